//! # statchat
//!
//! Leptos + WASM client for the conversational statistical-analysis
//! backend: users upload tabular data, ask questions in natural language,
//! and render the backend's method choices, interpretations, and charts.
//!
//! This crate contains pages, components, application state, the REST
//! wrappers for the `/api/v2` backend, and the pure chart-option builder
//! feeding the ECharts host component.

pub mod app;
pub mod charts;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs panic/log hooks and hydrates the server-
/// rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

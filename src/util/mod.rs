//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and small pure
//! helpers from page and component logic to improve reuse and testability.

pub mod download;
pub mod format;
pub mod industries;
pub mod markdown;
pub mod models;
pub mod persistence;

//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the analysis workbench chrome and interaction surfaces
//! while reading/writing shared state from Leptos context providers. Route
//! orchestration stays in `pages`; network calls live behind `net::api`.

pub mod analysis_progress;
pub mod analysis_steps;
pub mod capability_steps;
pub mod chart_view;
pub mod chat_input;
pub mod conclusion_panel;
pub mod data_preview;
pub mod effect_size_bar;
pub mod export_menu;
pub mod file_upload;
pub mod header;
pub mod history_table;
pub mod industry_select;
pub mod layout;
pub mod message_list;
pub mod method_badge;
pub mod module_selector;
pub mod search_filters;
pub mod sidebar;
pub mod spc_steps;
pub mod stat_card;
pub mod suggestions;
pub mod variable_picker;

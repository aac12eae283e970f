//! Route-level screens behind the router in `app`.

pub mod history;
pub mod home;
pub mod settings;

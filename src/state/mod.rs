//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`app`, `chat`, `config`, `session`) so
//! individual components can depend on small focused models. `App` provides
//! each one as an `RwSignal` context; async flows capture a [`chat`]
//! generation token before awaiting so stale responses never land in a
//! cleared conversation.

pub mod app;
pub mod chat;
pub mod config;
pub mod session;

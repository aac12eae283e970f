//! Backend protocol: wire types and the REST wrappers that carry them.

pub mod api;
pub mod types;

//! Loaders and actions, one module per route.

pub mod destroy;
pub mod root;

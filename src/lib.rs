//! signup-flow — multi-step signup wizard over a remote auth API.

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod wizard;

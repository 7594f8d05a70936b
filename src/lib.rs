//! node_status Library
//!
//! Reads the web API of a running storage node and renders a human-readable
//! report of its active and recent operations, with progress bars and node
//! statistics.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

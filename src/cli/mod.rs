//! Command-line interface components
//!
//! This module contains CLI-specific code for node_status: argument parsing
//! and the command handlers that drive the report.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GlobalArgs};
pub use commands::{build_status_config, exit_code, handle_capability, handle_status};

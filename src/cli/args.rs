//! Command-line argument parsing for node_status
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::constants::progress;

/// node_status - Show what a running storage node is doing
#[derive(Parser, Debug)]
#[command(
    name = "node_status",
    version,
    about = "Show active and recent operations of a running storage node",
    long_about = "Queries a running storage node's web API and prints its statistics together with
tables of active and recently completed uploads, downloads, publishes, retrieves and
servermap updates, with a progress bar for each operation."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands (defaults to `status`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Show per-operation details and enable info logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Node directory containing node.url and private/api_auth_token
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    pub node_directory: Option<PathBuf>,

    /// Node web API URL, overriding node.url
    #[arg(long, global = true, value_name = "URL")]
    pub node_url: Option<String>,

    /// Use ASCII instead of Unicode glyphs
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Progress bar width in cells
    #[arg(long, global = true, value_name = "CELLS")]
    pub width: Option<usize>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print node statistics and active/recent operations
    Status,

    /// Print the JSON the node returns for a capability
    Cap {
        /// Capability string
        #[arg(value_name = "CAP")]
        capability: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, defaulting to `status`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Status)
    }

    /// Get the logging level based on global arguments
    ///
    /// Returns `None` when no verbosity flag was given, so the configured
    /// default applies.
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl GlobalArgs {
    /// Check flag combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && (self.verbose || self.very_verbose) {
            return Err("Cannot combine --quiet with --verbose or --very-verbose".to_string());
        }
        if self.width == Some(0) {
            return Err("Progress bar width must be greater than 0".to_string());
        }
        if self.width.map_or(false, |width| width > progress::MAX_WIDTH) {
            return Err(format!(
                "Progress bar width must be at most {}",
                progress::MAX_WIDTH
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("node_status").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_command_is_status() {
        let cli = parse(&[]);
        assert!(matches!(cli.command(), Commands::Status));
        assert_eq!(cli.log_level(), None);
    }

    #[test]
    fn test_cap_command() {
        let cli = parse(&["cap", "URI:CHK:abc", "--ascii"]);
        match cli.command() {
            Commands::Cap { capability } => assert_eq!(capability, "URI:CHK:abc"),
            other => panic!("Expected cap command, got {:?}", other),
        }
        assert!(cli.global.ascii);
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["-v", "-d", "/tmp/node", "--width", "20", "status"]);
        assert!(cli.global.verbose);
        assert_eq!(cli.global.node_directory, Some(PathBuf::from("/tmp/node")));
        assert_eq!(cli.global.width, Some(20));
        assert_eq!(cli.log_level(), Some(tracing::Level::INFO));
    }

    #[test]
    fn test_validation() {
        let cli = parse(&["-q", "-v"]);
        assert!(cli.global.validate().is_err());

        let cli = parse(&["--width", "0"]);
        assert!(cli.global.validate().is_err());

        let cli = parse(&["--width", "200"]);
        assert!(cli.global.validate().is_ok());

        let cli = parse(&["--width", "18446744073709551615"]);
        assert!(cli.global.validate().is_err());

        let cli = parse(&["-q"]);
        assert!(cli.global.validate().is_ok());
        assert_eq!(cli.log_level(), Some(tracing::Level::ERROR));
    }
}

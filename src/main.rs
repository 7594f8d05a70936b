//! node_status CLI application
//!
//! Prints statistics and active/recent operations of a running storage node.

use std::process;

use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use node_status::cli::{handle_capability, handle_status, Cli, Commands};
use node_status::config::AppConfig;
use node_status::constants::exit;
use node_status::errors::Result;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!(category = e.category(), "{}", e);
            eprintln!("Error: {}", e);
            exit::FAILURE
        }
    };
    process::exit(code);
}

/// Main application logic, returning the exit code
async fn run() -> Result<i32> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let app_config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &app_config);
    info!("node_status v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command() {
        Commands::Status => {
            debug!("Executing status command");
            handle_status(&cli.global, &app_config).await
        }
        Commands::Cap { capability } => {
            debug!("Executing cap command");
            handle_capability(&cli.global, &app_config, &capability).await
        }
    }
}

/// Initialize logging based on CLI verbosity and the configured default level
fn init_logging(cli: &Cli, app_config: &AppConfig) {
    let level = cli
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| app_config.logging.level.clone());

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("node_status={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();
}

//! Command handlers for node_status CLI
//!
//! Handlers turn CLI arguments and the loaded configuration into a
//! `StatusConfig`, run the requested command and return the process exit code.

use std::io::{self, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::app::{NodeClient, ReportOutcome, StatusConfig, StatusPresenter};
use crate::auth::{load_node_credentials, resolve_node_directory};
use crate::cli::GlobalArgs;
use crate::config::AppConfig;
use crate::constants::exit;
use crate::errors::{AppError, Result};

/// Handle the status command
///
/// Fetch failures are reported on stderr and reflected in the exit code;
/// they are not returned as errors.
pub async fn handle_status(global: &GlobalArgs, app_config: &AppConfig) -> Result<i32> {
    let config = build_status_config(global, app_config)?;
    info!("Querying node at {}", config.node_url);

    let client =
        NodeClient::with_client_config(config, &app_config.client.to_runtime_config())?;
    let presenter = StatusPresenter::new(client);

    let spinner = fetch_spinner(global, "Fetching node status...");
    let (status, statistics) = presenter.fetch().await;
    spinner.finish_and_clear();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let outcome = crate::app::write_report(
        presenter.client().config(),
        status,
        statistics,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    Ok(exit_code(&outcome))
}

/// Handle the cap command: pretty-print the node's JSON for a capability
pub async fn handle_capability(
    global: &GlobalArgs,
    app_config: &AppConfig,
    capability: &str,
) -> Result<i32> {
    let config = build_status_config(global, app_config)?;
    let client =
        NodeClient::with_client_config(config, &app_config.client.to_runtime_config())?;

    let spinner = fetch_spinner(global, "Looking up capability...");
    let result = client.fetch_for_capability(capability).await;
    spinner.finish_and_clear();

    let value = result?;
    let rendered = serde_json::to_string_pretty(&value)
        .map_err(|e| AppError::generic(format!("Failed to format JSON: {}", e)))?;

    let stdout = io::stdout();
    writeln!(stdout.lock(), "{}", rendered)?;
    Ok(exit::SUCCESS)
}

/// Map a report outcome onto a process exit code
pub fn exit_code(outcome: &ReportOutcome) -> i32 {
    match outcome {
        ReportOutcome::Complete { .. } => exit::SUCCESS,
        ReportOutcome::Partial { error, .. } => {
            warn!("Report rendered without statistics: {}", error);
            exit::SUCCESS
        }
        ReportOutcome::Unavailable { .. } => exit::NO_DATA,
    }
}

/// Combine node directory, config file and CLI flags
///
/// With `--node-url`, a missing or unreadable node directory is tolerated
/// and requests go out without a token.
pub fn build_status_config(global: &GlobalArgs, app_config: &AppConfig) -> Result<StatusConfig> {
    global.validate().map_err(AppError::generic)?;

    let node_directory = resolve_node_directory(global.node_directory.as_deref())?;
    let config = match (&global.node_url, load_node_credentials(&node_directory)) {
        (Some(url), Ok(credentials)) => StatusConfig::new(url).with_credentials(credentials.token),
        (Some(url), Err(e)) => {
            warn!("Continuing without API token: {}", e);
            StatusConfig::new(url)
        }
        (None, Ok(credentials)) => credentials.into_status_config(),
        (None, Err(e)) => return Err(e.into()),
    };

    let display = &app_config.display;
    let config = config
        .with_verbose(global.verbose || global.very_verbose || display.verbose)
        .with_ascii(global.ascii || display.ascii)
        .with_bar_width(global.width.unwrap_or(display.bar_width));

    debug!("Status configuration: {:?}", config);
    Ok(config)
}

/// Spinner on stderr while waiting for the node; hidden when stderr is not
/// a terminal or in quiet mode
fn fetch_spinner(global: &GlobalArgs, message: &str) -> ProgressBar {
    if global.quiet || !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|style| style.tick_strings(&["◐", "◓", "◑", "◒", "●"]));
    if let Ok(style) = style {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

//! Prelude module for node_status
//!
//! Re-exports the items needed to fetch and render a node report with a
//! single `use node_status::prelude::*;`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use node_status::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = load_node_credentials(&resolve_node_directory(None)?)?;
//!     let presenter = StatusPresenter::new(NodeClient::new(credentials.into_status_config())?);
//!     presenter
//!         .render_report(&mut std::io::stdout(), &mut std::io::stderr())
//!         .await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, FetchError, Result};

// Essential app components
pub use crate::app::{
    ApiToken, Method, NodeClient, OperationKind, OperationRecord, PostArgs, ReportOutcome,
    ReportSummary, StatsSnapshot, StatusConfig, StatusPresenter, StatusSnapshot,
};

// Progress bar rendering
pub use crate::app::progress::render as render_progress;

// Node directory access
pub use crate::auth::{load_node_credentials, resolve_node_directory, NodeCredentials};

// Commonly used constants
pub use crate::constants::DEFAULT_BAR_WIDTH;

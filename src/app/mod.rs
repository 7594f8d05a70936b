//! Core application logic for node_status
//!
//! This module contains the JSON client for the node's web API, the
//! operation data models, the progress bar renderer and the report presenter.
//!
//! # Examples
//!
//! ```rust,no_run
//! use node_status::app::{NodeClient, StatusConfig, StatusPresenter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StatusConfig::new("http://127.0.0.1:3456").with_verbose(true);
//! let presenter = StatusPresenter::new(NodeClient::new(config)?);
//!
//! let outcome = presenter
//!     .render_report(&mut std::io::stdout(), &mut std::io::stderr())
//!     .await?;
//! if let Some(summary) = outcome.summary() {
//!     println!("{} operations shown", summary.total());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod format;
pub mod models;
pub mod progress;
pub mod report;

// Re-export main public API
pub use client::{
    ApiToken, ClientConfig, HttpTransport, Method, NodeClient, PostArgs, StatusConfig, Transport,
};
pub use models::{OperationKind, OperationRecord, StatsSnapshot, StatusSnapshot, UploadProgress};
pub use report::{write_report, ReportOutcome, ReportSummary, StatusPresenter};

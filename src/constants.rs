//! Application constants for node_status
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Environment variable naming the node directory
    pub const NODE_DIRECTORY: &str = "NODE_STATUS_DIR";
}

/// Node directory layout
pub mod node {
    /// File holding the node's web API base URL
    pub const URL_FILE: &str = "node.url";

    /// Directory holding private node state
    pub const PRIVATE_DIR: &str = "private";

    /// File (under `private/`) holding the web API auth token
    pub const API_TOKEN_FILE: &str = "api_auth_token";

    /// Default node directory, relative to the user's home
    pub const DEFAULT_DIR_NAME: &str = ".tahoe";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("node_status/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Header carrying the API token
    pub const AUTH_HEADER: &str = "X-Tahoe-Authorization";

    /// Scheme prefix for the API token header value
    pub const AUTH_SCHEME: &str = "tahoe-bearer";

    /// Maximum length of node-supplied error text kept in a bad-response error
    pub const MAX_ERROR_BODY_CHARS: usize = 512;
}

/// Node web API fragments
pub mod endpoints {
    /// Operation list
    pub const STATUS: &str = "status?t=json";

    /// Counters and stats
    pub const STATISTICS: &str = "statistics?t=json";

    /// Prefix for capability lookups
    pub const URI_PREFIX: &str = "uri/";

    /// Suffix for capability lookups
    pub const JSON_SUFFIX: &str = "?t=json";
}

/// Progress bar rendering
pub mod progress {
    /// Default bar width in cells
    pub const DEFAULT_WIDTH: usize = 10;

    /// Bar width used in the report table
    pub const REPORT_WIDTH: usize = 15;

    /// Largest bar width accepted from the command line or config file
    pub const MAX_WIDTH: usize = 200;

    /// Full cell in ASCII mode
    pub const ASCII_FULL: char = '#';

    /// Partial-cell glyphs in ASCII mode, by quarter of a cell
    pub const ASCII_PARTIAL: [char; 4] = ['.', 'o', 'O', '%'];

    /// Full block (U+2588)
    pub const UNICODE_FULL: char = '\u{2588}';

    /// Left one-eighth block; narrower-to-wider glyphs count down from here
    pub const UNICODE_PARTIAL_BASE: u32 = 0x258F;

    /// Number of sub-cell levels in Unicode mode
    pub const UNICODE_LEVELS: usize = 8;

    /// Empty cell
    pub const EMPTY: char = ' ';
}

/// Statistics keys published by the node
pub mod stats {
    pub const BYTES_DOWNLOADED: &str = "downloader.bytes_downloaded";
    pub const FILES_DOWNLOADED: &str = "downloader.files_downloaded";
    pub const BYTES_UPLOADED: &str = "uploader.bytes_uploaded";
    pub const FILES_UPLOADED: &str = "uploader.files_uploaded";
    pub const NODE_UPTIME: &str = "node.uptime";
}

/// Report table layout
pub mod report {
    /// Kind column width
    pub const KIND_WIDTH: usize = 5;

    /// Storage index column width
    pub const STORAGE_INDEX_WIDTH: usize = 26;

    /// Progress column width (bar + percentage)
    pub const PROGRESS_WIDTH: usize = 22;

    /// Status column separator width
    pub const STATUS_WIDTH: usize = 20;

    /// Placeholder for missing values
    pub const PLACEHOLDER: &str = "-";
}

/// Configuration file locations
pub mod config {
    /// Project-local config file
    pub const LOCAL_FILE: &str = "./node-status.toml";

    /// Directory under the user config dir
    pub const APP_DIR: &str = "node-status";

    /// File name under the app config dir
    pub const FILE_NAME: &str = "config.toml";
}

/// Process exit codes
pub mod exit {
    /// Report rendered (fully or partially)
    pub const SUCCESS: i32 = 0;

    /// Scaffolding failure (node directory, config)
    pub const FAILURE: i32 = 1;

    /// No operation data could be retrieved from the node
    pub const NO_DATA: i32 = 2;
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use env::NODE_DIRECTORY as ENV_NODE_DIRECTORY;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use progress::DEFAULT_WIDTH as DEFAULT_BAR_WIDTH;

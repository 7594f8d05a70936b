//! Error types for node_status
//!
//! Each concern of the tool gets its own error enum. `AppError` wraps all of
//! them so that command handlers can propagate with `?` and `main` can map a
//! single error type onto an exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching JSON from the node's web API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Caller passed a method/argument combination the fetcher refuses.
    /// Raised before any network I/O.
    #[error("{reason}")]
    InvalidArgument { reason: String },

    /// Node answered with a non-success status
    #[error("Failed to get json from '{url}': {error}")]
    BadResponse { url: String, error: String },

    /// Node answered successfully but the JSON body was `null`
    #[error("No data from '{url}'")]
    NoData { url: String },

    /// Response body was not JSON
    #[error("Invalid JSON from '{url}': {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body was valid JSON but not the structure the caller needs
    #[error("Unexpected response from '{url}': expected {expected}")]
    UnexpectedShape { url: String, expected: &'static str },

    /// Node URL plus fragment did not form a valid URL
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Connection refused, timeout, or any other transport fault
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Create an invalid-argument error with a message
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// True for errors the caller caused, as opposed to node or network faults
    pub fn is_caller_error(&self) -> bool {
        matches!(self, FetchError::InvalidArgument { .. })
    }
}

/// Errors reading the node directory (`node.url`, `private/api_auth_token`)
#[derive(Error, Debug)]
pub enum NodeError {
    /// Node directory does not exist
    #[error("Node directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A required file could not be read
    #[error("Failed to read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required file was present but empty
    #[error("File is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// No node directory given and no default could be determined
    #[error("Could not determine node directory. Pass --node-directory or set {var}")]
    NoNodeDirectory { var: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Node directory error
    #[error(transparent)]
    Node(#[from] NodeError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Node(_) => "node",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Node directory result type alias
pub type NodeResult<T> = std::result::Result<T, NodeError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

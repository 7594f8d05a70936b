//! HTTP client configuration and per-invocation status configuration
//!
//! `ClientConfig` controls how the reqwest client is built. `StatusConfig` is
//! the immutable `{node_url, credentials, verbose}` bundle that the CLI layer
//! hands to the fetcher and the report presenter.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{http, progress};
use crate::errors::{FetchError, FetchResult};

/// Configuration for the HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tcp_nodelay: true,
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            user_agent: http::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> FetchResult<Client> {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .tcp_nodelay(self.tcp_nodelay)
            .build()
            .map_err(FetchError::Transport)
    }
}

/// The node's web API token
///
/// Kept out of `Debug` output so it never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the authorization header
    pub fn header_value(&self) -> String {
        format!("{} {}", http::AUTH_SCHEME, self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Everything one status invocation needs to know about the node and output
#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Base URL of the node's web API, without a trailing slash
    pub node_url: String,
    /// API token attached to every request
    pub credentials: Option<ApiToken>,
    /// Include per-record detail fields in the report
    pub verbose: bool,
    /// Render progress bars and table borders in ASCII
    pub ascii: bool,
    /// Progress bar width in cells
    pub bar_width: usize,
}

impl StatusConfig {
    /// Create a configuration for the given node URL
    ///
    /// A URL without a scheme (as written by some nodes to `node.url`) is
    /// assumed to be plain HTTP. Trailing slashes are dropped.
    pub fn new(node_url: impl AsRef<str>) -> Self {
        Self {
            node_url: normalize_node_url(node_url.as_ref()),
            credentials: None,
            verbose: false,
            ascii: false,
            bar_width: progress::REPORT_WIDTH,
        }
    }

    pub fn with_credentials(mut self, token: ApiToken) -> Self {
        self.credentials = Some(token);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }
}

fn normalize_node_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert!(config.tcp_nodelay);
        assert_eq!(config.request_timeout, http::DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("node_status/"));
    }

    #[test]
    fn test_http_client_creation() {
        let config = ClientConfig {
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        assert!(config.build_http_client().is_ok());
    }

    #[test]
    fn test_node_url_normalization() {
        assert_eq!(
            StatusConfig::new("http://localhost:1234/").node_url,
            "http://localhost:1234"
        );
        assert_eq!(
            StatusConfig::new("localhost:9000\n").node_url,
            "http://localhost:9000"
        );
        assert_eq!(
            StatusConfig::new("https://node.example:3456").node_url,
            "https://node.example:3456"
        );
    }

    #[test]
    fn test_token_is_redacted() {
        let config = StatusConfig::new("http://localhost:1234")
            .with_credentials(ApiToken::new("a".repeat(32)));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("aaaa"));
        assert!(debug.contains("redacted"));
        assert_eq!(
            config.credentials.unwrap().header_value(),
            format!("tahoe-bearer {}", "a".repeat(32))
        );
    }

    #[test]
    fn test_builder_flags() {
        let config = StatusConfig::new("http://localhost:1234")
            .with_verbose(true)
            .with_ascii(true)
            .with_bar_width(20);
        assert!(config.verbose);
        assert!(config.ascii);
        assert_eq!(config.bar_width, 20);
    }
}

//! JSON client for the node's web API
//!
//! `NodeClient` performs exactly one request per call, with no retries, and
//! classifies failures into the variants of `FetchError`.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and the per-invocation `StatusConfig`
//! - `http`: request validation, the `Transport` seam and response classification

use std::sync::Arc;

use serde_json::Value;
use url::form_urlencoded;

use crate::constants::endpoints;
use crate::errors::FetchResult;

// Module declarations
pub mod config;
pub mod http;

pub use config::{ApiToken, ClientConfig, StatusConfig};
pub use http::{
    build_request, classify_response, FetchRequest, FetchResponse, HttpTransport, Method,
    PostArgs, Transport,
};

/// Client for the node's JSON status endpoints
#[derive(Clone)]
pub struct NodeClient {
    config: StatusConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NodeClient {
    /// Creates a client using a default reqwest transport
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built
    pub fn new(config: StatusConfig) -> FetchResult<Self> {
        Self::with_client_config(config, &ClientConfig::default())
    }

    /// Creates a client whose reqwest transport uses custom settings
    pub fn with_client_config(
        config: StatusConfig,
        client_config: &ClientConfig,
    ) -> FetchResult<Self> {
        let transport = HttpTransport::from_config(client_config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over an arbitrary transport
    pub fn with_transport(config: StatusConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    /// Fetch and parse the JSON for a URL fragment relative to the node URL
    ///
    /// # Arguments
    ///
    /// * `fragment` - Path (and query) relative to the node URL
    /// * `method` - GET or POST
    /// * `post_args` - Form arguments; required for POST, rejected for GET
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` before any I/O if method and `post_args` disagree
    /// - `BadResponse` if the node answers with a non-success status
    /// - `NoData` if the node answers with JSON `null`
    /// - `Transport` for connection-level failures
    pub async fn fetch_json(
        &self,
        fragment: &str,
        method: Method,
        post_args: Option<&PostArgs>,
    ) -> FetchResult<Value> {
        let request = build_request(
            &self.config.node_url,
            self.config.credentials.as_ref(),
            fragment,
            method,
            post_args,
        )?;

        tracing::debug!("Fetching {} {}", request.method, request.url);
        let response = self.transport.execute(&request).await?;
        classify_response(response, &request.url)
    }

    /// GET the JSON for a URL fragment
    pub async fn get_json(&self, fragment: &str) -> FetchResult<Value> {
        self.fetch_json(fragment, Method::Get, None).await
    }

    /// GET the JSON describing a capability (`uri/<cap>?t=json`)
    pub async fn fetch_for_capability(&self, capability: &str) -> FetchResult<Value> {
        self.get_json(&capability_fragment(capability)).await
    }
}

/// Fragment addressing a capability, with the capability percent-encoded
/// as a single path segment
pub fn capability_fragment(capability: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(capability.as_bytes()).collect();
    // byte_serialize writes spaces as '+', which is literal in a path
    format!(
        "{}{}{}",
        endpoints::URI_PREFIX,
        encoded.replace('+', "%20"),
        endpoints::JSON_SUFFIX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_fragment() {
        assert_eq!(capability_fragment("fake cap"), "uri/fake%20cap?t=json");
        assert_eq!(
            capability_fragment("URI:CHK:abc/def"),
            "uri/URI%3ACHK%3Aabc%2Fdef?t=json"
        );
        assert_eq!(capability_fragment("a+b"), "uri/a%2Bb?t=json");
    }

    #[test]
    fn test_client_creation() {
        let client = NodeClient::new(StatusConfig::new("http://localhost:1234"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().config().node_url, "http://localhost:1234");
    }

    #[test]
    fn test_invalid_arguments_fail_without_network() {
        // Port 9 is discard; the request must be rejected before any connect
        let client = NodeClient::new(StatusConfig::new("http://127.0.0.1:9")).unwrap();
        let err = tokio_test::block_on(client.fetch_json("fragment", Method::Post, None))
            .unwrap_err();
        assert!(err.is_caller_error());
    }
}

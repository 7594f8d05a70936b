//! Request construction, transport and response classification
//!
//! The fetch contract is split into three steps so each can be exercised on
//! its own:
//! - `build_request` validates the method/argument combination and forms the
//!   URL. It performs no I/O.
//! - a [`Transport`] executes the request. `HttpTransport` uses reqwest;
//!   tests substitute a scripted transport.
//! - `classify_response` turns the raw response into JSON or a `FetchError`.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::config::{ApiToken, ClientConfig};
use crate::constants::http;
use crate::errors::{FetchError, FetchResult};

/// Form arguments for POST requests
pub type PostArgs = BTreeMap<String, String>;

/// HTTP method supported by the node API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A validated request, ready for a transport
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    /// Form body, present exactly when `method` is POST
    pub form: Option<PostArgs>,
    pub token: Option<ApiToken>,
}

/// Raw response as seen by the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Canonical reason phrase, if the status has one
    pub reason: Option<String>,
    pub body: String,
}

impl FetchResponse {
    /// A 200 response with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: Some("OK".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request against the node
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &FetchRequest) -> FetchResult<FetchResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport around an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the configuration and wraps it
    pub fn from_config(config: &ClientConfig) -> FetchResult<Self> {
        Ok(Self::new(config.build_http_client()?))
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &FetchRequest) -> FetchResult<FetchResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
        };
        if let Some(token) = &request.token {
            builder = builder.header(http::AUTH_HEADER, token.header_value());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.url,
            status,
            body.len()
        );

        Ok(FetchResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}

/// Validate the method/argument combination and form the request URL
///
/// # Errors
///
/// - `InvalidArgument` for POST without (non-empty) `post_args`, or GET with
///   `post_args`
/// - `InvalidUrl` if node URL and fragment do not form a URL
pub fn build_request(
    node_url: &str,
    token: Option<&ApiToken>,
    fragment: &str,
    method: Method,
    post_args: Option<&PostArgs>,
) -> FetchResult<FetchRequest> {
    let form = match (method, post_args) {
        (Method::Post, Some(args)) if !args.is_empty() => Some(args.clone()),
        (Method::Post, _) => {
            return Err(FetchError::invalid_argument(
                "Must pass post_args for POST method",
            ))
        }
        (Method::Get, Some(_)) => {
            return Err(FetchError::invalid_argument(
                "post_args only valid for POST method",
            ))
        }
        (Method::Get, None) => None,
    };

    let joined = format!(
        "{}/{}",
        node_url.trim_end_matches('/'),
        fragment.trim_start_matches('/')
    );
    let url = Url::parse(&joined).map_err(|e| FetchError::InvalidUrl {
        url: joined.clone(),
        error: e.to_string(),
    })?;

    Ok(FetchRequest {
        method,
        url,
        form,
        token: token.cloned(),
    })
}

/// Turn a raw response into parsed JSON
///
/// # Errors
///
/// - `BadResponse` for non-2xx statuses, carrying the node's error text
/// - `InvalidJson` if the body does not parse
/// - `NoData` if the body is JSON `null`
pub fn classify_response(response: FetchResponse, url: &Url) -> FetchResult<Value> {
    if !response.is_success() {
        return Err(FetchError::BadResponse {
            url: url.to_string(),
            error: describe_failure(&response),
        });
    }

    let parsed: Value =
        serde_json::from_str(&response.body).map_err(|source| FetchError::InvalidJson {
            url: url.to_string(),
            source,
        })?;

    if parsed.is_null() {
        return Err(FetchError::NoData {
            url: url.to_string(),
        });
    }
    Ok(parsed)
}

fn describe_failure(response: &FetchResponse) -> String {
    let status = match &response.reason {
        Some(reason) => format!("{} {}", response.status, reason),
        None => response.status.to_string(),
    };
    let body = response.body.trim();
    if body.is_empty() {
        status
    } else {
        let excerpt: String = body.chars().take(http::MAX_ERROR_BODY_CHARS).collect();
        format!("{}: {}", status, excerpt)
    }
}

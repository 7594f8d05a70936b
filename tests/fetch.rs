//! Integration tests for the JSON fetch contract
//!
//! These drive `NodeClient` end to end over a scripted transport, checking
//! validation, URL construction and failure classification.

mod common;

use common::{Reply, ScriptedNode};
use node_status::app::client::{ApiToken, FetchResponse, Method, NodeClient, PostArgs, StatusConfig};
use node_status::errors::FetchError;
use serde_json::json;

fn client(node: &std::sync::Arc<ScriptedNode>, url: &str) -> NodeClient {
    let config = StatusConfig::new(url).with_credentials(ApiToken::new("a".repeat(32)));
    NodeClient::with_transport(config, node.clone())
}

fn post_args() -> PostArgs {
    PostArgs::from([("foo".to_string(), "bar".to_string())])
}

#[tokio::test]
async fn test_happy_path() {
    let node = ScriptedNode::new().json("/fragment/", json!({"some": "json"}));
    let value = client(&node, "http://localhost:1234/")
        .fetch_json("/fragment/", Method::Get, None)
        .await
        .unwrap();

    assert_eq!(value, json!({"some": "json"}));

    let requests = node.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert!(requests[0].form.is_none());
    assert_eq!(
        requests[0].token.as_ref().map(ApiToken::expose),
        Some("a".repeat(32).as_str())
    );
}

#[tokio::test]
async fn test_happy_path_post() {
    let node = ScriptedNode::new().json("/fragment/", json!({"some": "json"}));
    let value = client(&node, "http://localhost:1234/")
        .fetch_json("/fragment/", Method::Post, Some(&post_args()))
        .await
        .unwrap();

    assert_eq!(value, json!({"some": "json"}));
    assert_eq!(node.requests()[0].form, Some(post_args()));
}

#[tokio::test]
async fn test_happy_path_for_cap() {
    let node = ScriptedNode::new().json("/uri/fake%20cap", json!({"some": "json"}));
    let value = client(&node, "http://localhost:1234")
        .fetch_for_capability("fake cap")
        .await
        .unwrap();

    assert_eq!(value, json!({"some": "json"}));
    let request = &node.requests()[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url.query(), Some("t=json"));
}

#[tokio::test]
async fn test_no_data_returned() {
    let node = ScriptedNode::new().reply("/uri/fake%20cap", Reply::Response(FetchResponse::ok("null")));
    let err = client(&node, "http://localhost:1234")
        .fetch_for_capability("fake cap")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::NoData { .. }));
    assert!(err.to_string().contains("No data from"));
}

#[tokio::test]
async fn test_bad_response() {
    let node = ScriptedNode::new().reply(
        "/fragment",
        Reply::Response(FetchResponse {
            status: 500,
            reason: Some("Internal Server Error".to_string()),
            body: "some err".to_string(),
        }),
    );
    let err = client(&node, "http://localhost:1234")
        .fetch_json("/fragment", Method::Get, None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to get"));
    assert!(err.to_string().contains("some err"));
}

#[tokio::test]
async fn test_no_post_args() {
    let node = ScriptedNode::new();
    let err = client(&node, "http://localhost:1234")
        .fetch_json("/fragment", Method::Post, None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Must pass post_args"));
    assert!(node.requests().is_empty(), "no request may be sent");
}

#[tokio::test]
async fn test_post_args_for_get() {
    let node = ScriptedNode::new();
    let err = client(&node, "http://localhost:1234")
        .fetch_json("/fragment", Method::Get, Some(&post_args()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("only valid for POST"));
    assert!(node.requests().is_empty(), "no request may be sent");
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let node = ScriptedNode::new().reply("/fragment", Reply::Unreachable);
    let err = client(&node, "http://localhost:1234")
        .fetch_json("/fragment", Method::Get, None)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}

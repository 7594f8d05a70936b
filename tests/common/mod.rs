//! Shared test fixtures: a scripted transport standing in for a node

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use node_status::app::client::{FetchRequest, FetchResponse, Transport};
use node_status::errors::{FetchError, FetchResult};

/// Canned reply for one URL path
#[derive(Clone)]
pub enum Reply {
    Response(FetchResponse),
    /// Simulates a connection-level failure
    Unreachable,
}

/// Transport answering from a table keyed by URL path, recording requests
#[derive(Default)]
pub struct ScriptedNode {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, path: &str, reply: Reply) -> Arc<Self> {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
        Arc::clone(self)
    }

    pub fn json(self: &Arc<Self>, path: &str, body: serde_json::Value) -> Arc<Self> {
        self.reply(path, Reply::Response(FetchResponse::ok(body.to_string())))
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedNode {
    async fn execute(&self, request: &FetchRequest) -> FetchResult<FetchResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().get(request.url.path()).cloned();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Unreachable) => Err(connection_refused().await),
            None => Ok(FetchResponse {
                status: 404,
                reason: Some("Not Found".to_string()),
                body: format!("no such resource: {}", request.url.path()),
            }),
        }
    }
}

/// A genuine reqwest transport error: connecting to a closed local port
async fn connection_refused() -> FetchError {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = reqwest::get(format!("http://127.0.0.1:{}/", port))
        .await
        .expect_err("nothing should be listening");
    FetchError::Transport(err)
}

//! End-to-end report rendering over a scripted node

mod common;

use common::{Reply, ScriptedNode};
use node_status::app::client::FetchResponse;
use node_status::app::{
    NodeClient, OperationKind, OperationRecord, ReportOutcome, StatusConfig, StatusPresenter,
    StatusSnapshot, UploadProgress,
};
use node_status::cli::exit_code;
use node_status::constants::exit;
use serde_json::json;

struct Rendered {
    outcome: ReportOutcome,
    out: String,
    err: String,
}

async fn render(node: &std::sync::Arc<ScriptedNode>, config: StatusConfig) -> Rendered {
    let presenter = StatusPresenter::new(NodeClient::with_transport(config, node.clone()));
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = presenter.render_report(&mut out, &mut err).await.unwrap();
    Rendered {
        outcome,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

fn statistics() -> serde_json::Value {
    json!({
        "counters": {
            "uploader.files_uploaded": 3,
            "uploader.bytes_uploaded": 5_000_000,
            "downloader.files_downloaded": 1,
            "downloader.bytes_downloaded": 512,
        },
        "stats": {"node.uptime": 3600.0},
    })
}

fn record(kind: OperationKind, status: &str) -> OperationRecord {
    let mut record = OperationRecord::new(kind);
    record.status = Some(status.to_string());
    record.total_size = Some(2_048);
    record.storage_index = Some("aaaabbbbccccdddd".to_string());
    record
}

fn one_of_each() -> StatusSnapshot {
    StatusSnapshot {
        active: vec![
            record(
                OperationKind::Upload(UploadProgress {
                    hash: Some(1.0),
                    ciphertext: Some(0.5),
                    encode_push: Some(0.0),
                }),
                "pushing shares",
            ),
            record(OperationKind::Download { progress: Some(0.25) }, "fetching segments"),
            record(OperationKind::Publish { progress: Some(1.0) }, "publishing"),
        ],
        recent: vec![
            record(OperationKind::Retrieve { progress: Some(1.0) }, "Finished"),
            record(
                OperationKind::ServermapUpdate {
                    mode: Some("MODE_READ".to_string()),
                },
                "Finished",
            ),
            record(
                OperationKind::Unknown {
                    type_name: Some("frobnicate".to_string()),
                    class: None,
                },
                "Finished",
            ),
        ],
    }
}

#[tokio::test]
async fn test_empty_node() {
    let node = ScriptedNode::new()
        .json("/status", json!({"active": [], "recent": []}))
        .json("/statistics", statistics());

    let rendered = render(&node, StatusConfig::new("http://127.0.0.1:3456")).await;

    let summary = rendered.outcome.summary().copied().unwrap();
    assert_eq!(summary.total(), 0);
    assert_eq!(summary.skipped, 0);
    assert!(matches!(rendered.outcome, ReportOutcome::Complete { .. }));
    assert!(rendered.out.contains("Statistics (for last"));
    assert!(rendered.out.contains("uploaded 5.00 MB in 3 files"));
    assert!(rendered.out.contains("No active operations."));
    assert!(rendered.out.contains("Skipped 0 of 0 operations"));
    assert!(rendered.err.is_empty());
    assert_eq!(exit_code(&rendered.outcome), exit::SUCCESS);
}

#[tokio::test]
async fn test_one_record_of_each_kind() {
    let node = ScriptedNode::new()
        .json("/status", one_of_each().to_json())
        .json("/statistics", statistics());

    let rendered = render(&node, StatusConfig::new("http://127.0.0.1:3456")).await;

    let summary = rendered.outcome.summary().copied().unwrap();
    assert_eq!(summary.active, 3);
    assert_eq!(summary.recent, 3);
    assert_eq!(summary.skipped, 1);
    assert!(rendered.out.contains("Skipped 1 of 6 operations"));
    assert!(rendered.out.contains("unrecognized operation 'frobnicate'"));
    assert!(rendered.out.contains("( 50%)"), "upload is the mean of its phases");
    assert!(rendered.out.contains("( 25%)"));
    assert!(rendered.out.contains("(100%)"));
    for label in ["put", "get", "pub", "ret", "map"] {
        assert!(rendered.out.contains(label), "missing {} row", label);
    }

    let recent_at = rendered.out.find("Recent operations").unwrap();
    let stats_at = rendered.out.find("Statistics (for last").unwrap();
    assert!(recent_at < stats_at, "statistics trail the operation tables");
}

#[tokio::test]
async fn test_ascii_report_has_no_box_drawing() {
    let node = ScriptedNode::new()
        .json("/status", one_of_each().to_json())
        .json("/statistics", statistics());

    let config = StatusConfig::new("http://127.0.0.1:3456").with_ascii(true);
    let rendered = render(&node, config).await;

    assert!(rendered.out.is_ascii());
}

#[tokio::test]
async fn test_unreachable_node() {
    let node = ScriptedNode::new()
        .reply("/status", Reply::Unreachable)
        .reply("/statistics", Reply::Unreachable);

    let rendered = render(&node, StatusConfig::new("http://127.0.0.1:3456")).await;

    assert!(matches!(rendered.outcome, ReportOutcome::Unavailable { .. }));
    assert!(rendered.err.contains("failed to retrieve statistics"));
    assert!(rendered.err.contains("failed to retrieve data"));
    assert!(!rendered.out.contains("Active"));
    assert_eq!(exit_code(&rendered.outcome), exit::NO_DATA);
}

#[tokio::test]
async fn test_statistics_failure_still_lists_operations() {
    let node = ScriptedNode::new()
        .json("/status", one_of_each().to_json())
        .reply(
            "/statistics",
            Reply::Response(FetchResponse {
                status: 500,
                reason: Some("Internal Server Error".to_string()),
                body: "boom".to_string(),
            }),
        );

    let rendered = render(&node, StatusConfig::new("http://127.0.0.1:3456")).await;

    assert!(matches!(rendered.outcome, ReportOutcome::Partial { .. }));
    assert!(rendered.err.contains("failed to retrieve statistics"));
    assert!(!rendered.out.contains("Statistics (for last"));
    assert!(rendered.out.contains("Skipped 1 of 6 operations"));
    assert_eq!(exit_code(&rendered.outcome), exit::SUCCESS);
}

#[tokio::test]
async fn test_status_that_is_not_an_object() {
    let node = ScriptedNode::new()
        .json("/status", json!([1, 2, 3]))
        .json("/statistics", statistics());

    let rendered = render(&node, StatusConfig::new("http://127.0.0.1:3456")).await;

    match rendered.outcome {
        ReportOutcome::Unavailable { error } => {
            assert!(error.to_string().contains("status?t=json"))
        }
        other => panic!("Expected unavailable outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_requests_carry_token_and_query() {
    let node = ScriptedNode::new()
        .json("/status", json!({"active": [], "recent": []}))
        .json("/statistics", statistics());

    let config = StatusConfig::new("127.0.0.1:3456/")
        .with_credentials(node_status::app::ApiToken::new("secret-token"));
    render(&node, config).await;

    let requests = node.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.url.host_str(), Some("127.0.0.1"));
        assert_eq!(request.url.query(), Some("t=json"));
        assert_eq!(
            request.token.as_ref().map(|t| t.header_value()),
            Some("tahoe-bearer secret-token".to_string())
        );
    }
}

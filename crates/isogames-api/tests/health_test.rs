//! Integration tests for the health endpoint.

mod common;

use axum::http::StatusCode;
use isogames_test_support::get_json;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::build_test_app();

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["mounts"], 2);
}

#[tokio::test]
async fn test_health_counts_stub_mounts() {
    let app = common::build_stub_app();

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mounts"], 2);
}

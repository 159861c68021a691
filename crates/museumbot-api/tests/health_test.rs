//! Integration tests for the health endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::build_default_test_app();

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["storage"], "in_memory");
    assert_eq!(json["active_conversations"], 0);
}

#[tokio::test]
async fn test_health_counts_conversations_in_progress() {
    // Arrange
    let app = common::build_default_test_app();
    let date = common::days_from_today(3).to_string();

    // Act
    common::say(&app, "chat-1", "book").await;
    common::say(&app, "chat-2", "hello").await;
    let (_, during) = common::get_json(app.clone(), "/health").await;
    for text in ["1", date.as_str(), "2", "no"] {
        common::say(&app, "chat-1", text).await;
    }
    let (_, after) = common::get_json(app, "/health").await;

    // Assert
    assert_eq!(during["active_conversations"], 1);
    assert_eq!(after["active_conversations"], 0);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_default_test_app();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

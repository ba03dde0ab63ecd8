use axum::{body::Body as AxumBody, http::Request};
use serde_json::Value;
use tower::ServiceExt;

use crate::helpers::app::make_test_app;

#[tokio::test]
async fn test_health_is_public_and_reports_service() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(AxumBody::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), 200);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Service is up");
}

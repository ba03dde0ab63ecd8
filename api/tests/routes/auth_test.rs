use axum::{
    body::Body as AxumBody,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::user::{Model as UserModel, Role};

use crate::helpers::app::make_test_app;

async fn seed_instructor(db: &sea_orm::DatabaseConnection) -> UserModel {
    UserModel::create(
        db,
        "grace",
        "password123",
        Role::Instructor,
        "Grace Hopper",
        Some("grace@example.edu"),
    )
    .await
    .unwrap()
}

fn login_req(body: &Value) -> Request<AxumBody> {
    Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("Content-Type", "application/json")
        .body(AxumBody::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_login_success_returns_token_and_user() {
    let (app, state) = make_test_app().await;
    seed_instructor(state.db()).await;

    let body = serde_json::json!({ "username": "grace", "password": "password123" });
    let resp = app.oneshot(login_req(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["data"]["username"], "grace");
    assert_eq!(json["data"]["full_name"], "Grace Hopper");
    assert_eq!(json["data"]["role"], "instructor");
    assert!(!json["data"]["token"].as_str().unwrap().is_empty());
    assert!(!json["data"]["expires_at"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_same_message() {
    let (app, state) = make_test_app().await;
    seed_instructor(state.db()).await;

    let wrong_pw = serde_json::json!({ "username": "grace", "password": "nope" });
    let resp1 = app.clone().oneshot(login_req(&wrong_pw)).await.unwrap();
    assert_eq!(resp1.status(), StatusCode::UNAUTHORIZED);
    let bytes1 = axum::body::to_bytes(resp1.into_body(), usize::MAX)
        .await
        .unwrap();
    let json1: Value = serde_json::from_slice(&bytes1).unwrap();

    let unknown = serde_json::json!({ "username": "nobody", "password": "nope" });
    let resp2 = app.oneshot(login_req(&unknown)).await.unwrap();
    assert_eq!(resp2.status(), StatusCode::UNAUTHORIZED);
    let bytes2 = axum::body::to_bytes(resp2.into_body(), usize::MAX)
        .await
        .unwrap();
    let json2: Value = serde_json::from_slice(&bytes2).unwrap();

    // no username oracle
    assert_eq!(json1["message"], json2["message"]);
}

#[tokio::test]
async fn test_login_empty_fields_is_400() {
    let (app, _state) = make_test_app().await;

    let body = serde_json::json!({ "username": "", "password": "" });
    let resp = app.oneshot(login_req(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_requires_token() {
    let (app, state) = make_test_app().await;
    let user = seed_instructor(state.db()).await;

    let unauth = Request::builder()
        .method("POST")
        .uri("/api/logout")
        .body(AxumBody::empty())
        .unwrap();
    let resp = app.clone().oneshot(unauth).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (token, _) = generate_jwt(&user);
    let authed = Request::builder()
        .method("POST")
        .uri("/api/logout")
        .header("Authorization", format!("Bearer {}", token))
        .body(AxumBody::empty())
        .unwrap();
    let resp = app.oneshot(authed).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let (app, state) = make_test_app().await;
    let user = seed_instructor(state.db()).await;
    let (token, _) = generate_jwt(&user);

    let req = Request::builder()
        .method("GET")
        .uri("/api/me")
        .header("Authorization", format!("Bearer {}", token))
        .body(AxumBody::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["username"], "grace");
    // the hash never appears in any payload
    assert!(json["data"].get("password_hash").is_none());
}

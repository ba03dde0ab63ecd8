use axum::{
    body::Body as AxumBody,
    http::{Request, StatusCode},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::Value;
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::course::{Entity as CourseEntity, Model as CourseModel};
use db::models::user::{Entity as UserEntity, Model as UserModel, Role};

use crate::helpers::app::make_test_app;

struct Ctx {
    admin: UserModel,
    instructor: UserModel,
}

async fn setup(db: &DatabaseConnection) -> Ctx {
    let admin = UserModel::create(db, "admin", "password123", Role::Admin, "Site Admin", None)
        .await
        .unwrap();
    let instructor = UserModel::create(
        db,
        "grace",
        "password123",
        Role::Instructor,
        "Grace Hopper",
        None,
    )
    .await
    .unwrap();
    Ctx { admin, instructor }
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<AxumBody> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json");
    match body {
        Some(b) => builder.body(AxumBody::from(b.to_string())).unwrap(),
        None => builder.body(AxumBody::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_list_users_admin_only() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db()).await;

    let (admin_token, _) = generate_jwt(&ctx.admin);
    let resp = app
        .clone()
        .oneshot(authed("GET", "/api/users", &admin_token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (instr_token, _) = generate_jwt(&ctx.instructor);
    let resp = app
        .oneshot(authed("GET", "/api/users", &instr_token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_admin_user_requires_admin() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db()).await;

    let body = serde_json::json!({
        "username": "admin2",
        "password": "password123",
        "role": "admin",
        "full_name": "Second Admin"
    });

    // instructor is refused by the router guard
    let (instr_token, _) = generate_jwt(&ctx.instructor);
    let resp = app
        .clone()
        .oneshot(authed("POST", "/api/users", &instr_token, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // admin succeeds
    let (admin_token, _) = generate_jwt(&ctx.admin);
    let resp = app
        .oneshot(authed("POST", "/api/users", &admin_token, Some(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["role"], "admin");
    assert!(json["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_unknown_role_is_400() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db()).await;
    let (admin_token, _) = generate_jwt(&ctx.admin);

    let body = serde_json::json!({
        "username": "x",
        "password": "password123",
        "role": "superuser",
        "full_name": "X"
    });
    let resp = app
        .oneshot(authed("POST", "/api/users", &admin_token, Some(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_username_is_409() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db()).await;
    let (admin_token, _) = generate_jwt(&ctx.admin);

    let body = serde_json::json!({
        "username": "grace",
        "password": "password123",
        "role": "instructor",
        "full_name": "Grace Again"
    });
    let resp = app
        .oneshot(authed("POST", "/api/users", &admin_token, Some(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_user_guarded_by_owned_courses() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db()).await;
    let (admin_token, _) = generate_jwt(&ctx.admin);

    CourseModel::create(state.db(), "Owned", "OWN1", None, 10, ctx.instructor.id)
        .await
        .unwrap();

    // refused while courses exist
    let uri = format!("/api/users/{}", ctx.instructor.id);
    let resp = app
        .clone()
        .oneshot(authed("DELETE", &uri, &admin_token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // force cascades courses away
    let uri_force = format!("/api/users/{}?force=true", ctx.instructor.id);
    let resp = app
        .oneshot(authed("DELETE", &uri_force, &admin_token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(
        UserEntity::find_by_id(ctx.instructor.id)
            .one(state.db())
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(CourseEntity::find().count(state.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_unknown_user_is_404() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db()).await;
    let (admin_token, _) = generate_jwt(&ctx.admin);

    let resp = app
        .oneshot(authed("DELETE", "/api/users/9999", &admin_token, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

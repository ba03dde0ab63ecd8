use axum::{
    body::Body as AxumBody,
    http::{Request, StatusCode},
};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::Value;
use tower::ServiceExt;

use db::models::attendance::{Column as AttCol, Entity as AttendanceEntity};
use db::models::course::Model as CourseModel;
use db::models::session::Model as SessionModel;
use db::models::user::{Model as UserModel, Role};

use crate::helpers::app::{make_test_app, with_connect_info};

struct Ctx {
    course: CourseModel,
    session: SessionModel,
}

async fn setup(db: &DatabaseConnection, active: bool) -> Ctx {
    let grace = UserModel::create(db, "grace", "pw", Role::Instructor, "Grace Hopper", None)
        .await
        .unwrap();
    let course = CourseModel::create(db, "Compilers", "CS445", None, 80, grace.id)
        .await
        .unwrap();
    let session = SessionModel::create(
        db,
        course.id,
        "Week 1 lecture",
        Utc::now().date_naive(),
        active,
        None,
        None,
    )
    .await
    .unwrap();
    Ctx { course, session }
}

fn attend_post(uri: &str, body: &Value, ip: [u8; 4]) -> Request<AxumBody> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("User-Agent", "AttendTest/1.0")
        .body(AxumBody::from(body.to_string()))
        .unwrap();
    with_connect_info(req, ip)
}

#[tokio::test]
async fn test_entry_form_renders_course_and_session() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), true).await;

    let uri = format!("/attend/{}", ctx.session.entry_token);
    let req = Request::builder()
        .method("GET")
        .uri(&uri)
        .body(AxumBody::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Compilers"));
    assert!(html.contains("Week 1 lecture"));
    assert!(html.contains("<form"));
}

#[tokio::test]
async fn test_unknown_token_is_404() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/attend/deadbeefdeadbeef")
        .body(AxumBody::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({ "name": "Ada", "surname": "Lovelace" });
    let resp = app
        .oneshot(attend_post("/attend/deadbeefdeadbeef", &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_in_creates_exactly_one_row_and_rejects_duplicate() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), true).await;
    let uri = format!("/attend/{}", ctx.session.entry_token);
    let body = serde_json::json!({ "name": "Ada", "surname": "Lovelace", "student_id": "u20000001" });

    let resp = app
        .clone()
        .oneshot(attend_post(&uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Attendance recorded");

    // one row, stamped with course name, IP and user agent
    let rows = AttendanceEntity::find()
        .filter(AttCol::SessionId.eq(ctx.session.id))
        .all(state.db())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].course_name, ctx.course.name);
    assert_eq!(rows[0].ip_address.as_deref(), Some("198.51.100.7"));
    assert_eq!(rows[0].user_agent.as_deref(), Some("AttendTest/1.0"));
    assert_eq!(rows[0].student_id.as_deref(), Some("u20000001"));

    // identical resubmission is refused, even from another IP
    let resp = app
        .oneshot(attend_post(&uri, &body, [203, 0, 113, 50]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["message"].as_str().unwrap().contains("already submitted"));

    assert_eq!(
        AttendanceEntity::find()
            .filter(AttCol::SessionId.eq(ctx.session.id))
            .count(state.db())
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_check_in_requires_name_and_surname() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), true).await;
    let uri = format!("/attend/{}", ctx.session.entry_token);

    let body = serde_json::json!({ "name": "  ", "surname": "Lovelace" });
    let resp = app
        .oneshot(attend_post(&uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_in_inactive_session_is_400() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), false).await;
    let uri = format!("/attend/{}", ctx.session.entry_token);

    let body = serde_json::json!({ "name": "Ada", "surname": "Lovelace" });
    let resp = app
        .oneshot(attend_post(&uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["message"].as_str().unwrap().contains("not active"));
}

#[tokio::test]
async fn test_entry_alias_route_matches_primary() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), true).await;

    let alias_uri = format!("/attend/entry/{}", ctx.session.entry_token);
    let body = serde_json::json!({ "name": "Ada", "surname": "Lovelace" });
    let resp = app
        .oneshot(attend_post(&alias_uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_exit_requires_prior_entry_then_records_duration() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), true).await;
    let entry_uri = format!("/attend/{}", ctx.session.entry_token);
    let exit_uri = format!("/attend/exit/{}", ctx.session.exit_token);
    let body = serde_json::json!({ "name": "Ada", "surname": "Lovelace" });

    // exit before entry
    let resp = app
        .clone()
        .oneshot(attend_post(&exit_uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["message"].as_str().unwrap().contains("No matching check-in"));

    // entry, then exit
    let resp = app
        .clone()
        .oneshot(attend_post(&entry_uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(attend_post(&exit_uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["message"], "Check-out recorded");

    let row = AttendanceEntity::find()
        .filter(AttCol::SessionId.eq(ctx.session.id))
        .one(state.db())
        .await
        .unwrap()
        .unwrap();
    assert!(row.exit_time.is_some());
    assert!(row.duration_minutes.is_some());

    // second exit is refused
    let resp = app
        .oneshot(attend_post(&exit_uri, &body, [198, 51, 100, 7]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["message"].as_str().unwrap().contains("Already checked out"));
}

#[tokio::test]
async fn test_malformed_body_is_422() {
    let (app, state) = make_test_app().await;
    let ctx = setup(state.db(), true).await;
    let uri = format!("/attend/{}", ctx.session.entry_token);

    // missing required "surname" field fails JSON extraction
    let req = Request::builder()
        .method("POST")
        .uri(&uri)
        .header("Content-Type", "application/json")
        .body(AxumBody::from(r#"{"name":"Ada"}"#))
        .unwrap();
    let req = with_connect_info(req, [198, 51, 100, 7]);

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

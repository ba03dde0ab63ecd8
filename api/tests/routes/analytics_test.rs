use axum::{
    body::Body as AxumBody,
    http::{Request, StatusCode},
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::attendance::Model as AttendanceModel;
use db::models::course::Model as CourseModel;
use db::models::session::Model as SessionModel;
use db::models::user::{Model as UserModel, Role};

use crate::helpers::app::make_test_app;

struct Ctx {
    admin: UserModel,
    grace: UserModel,
}

/// Grace: 1 course, 2 sessions, 3 check-ins. Alan: 1 course, 1 session,
/// 1 check-in. Totals: 2 courses, 3 sessions, 4 rows.
async fn seed(db: &DatabaseConnection) -> Ctx {
    let admin = UserModel::create(db, "admin", "pw", Role::Admin, "Site Admin", None)
        .await
        .unwrap();
    let grace = UserModel::create(db, "grace", "pw", Role::Instructor, "Grace Hopper", None)
        .await
        .unwrap();
    let alan = UserModel::create(db, "alan", "pw", Role::Instructor, "Alan Turing", None)
        .await
        .unwrap();

    let now = Utc::now();
    let today = now.date_naive();

    let g_course = CourseModel::create(db, "Compilers", "CS445", None, 80, grace.id)
        .await
        .unwrap();
    let g1 = SessionModel::create(db, g_course.id, "G1", today, true, None, None)
        .await
        .unwrap();
    let g2 = SessionModel::create(db, g_course.id, "G2", today, true, None, None)
        .await
        .unwrap();
    for (name, surname) in [("Ada", "Lovelace"), ("Edsger", "Dijkstra")] {
        AttendanceModel::check_in(db, &g1, &g_course.name, name, surname, None, None, None, now)
            .await
            .unwrap();
    }
    AttendanceModel::check_in(db, &g2, &g_course.name, "Ada", "Lovelace", None, None, None, now)
        .await
        .unwrap();

    let a_course = CourseModel::create(db, "Computability", "CS301", None, 60, alan.id)
        .await
        .unwrap();
    let a1 = SessionModel::create(db, a_course.id, "A1", today, true, None, None)
        .await
        .unwrap();
    AttendanceModel::check_in(db, &a1, &a_course.name, "Kurt", "Goedel", None, None, None, now)
        .await
        .unwrap();

    Ctx { admin, grace }
}

fn authed(uri: &str, token: &str) -> Request<AxumBody> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(AxumBody::empty())
        .unwrap()
}

async fn json_of(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_overview_scopes_instructor_and_admin() {
    let (app, state) = make_test_app().await;
    let ctx = seed(state.db()).await;

    let (grace_token, _) = generate_jwt(&ctx.grace);
    let resp = app
        .clone()
        .oneshot(authed("/api/analytics/overview", &grace_token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_of(resp).await;
    assert_eq!(json["data"]["course_count"], 1);
    assert_eq!(json["data"]["session_count"], 2);
    assert_eq!(json["data"]["attendance_count"], 3);
    assert_eq!(json["data"]["avg_attendance_per_session"], 1.5);

    let (admin_token, _) = generate_jwt(&ctx.admin);
    let resp = app
        .oneshot(authed("/api/analytics/overview", &admin_token))
        .await
        .unwrap();
    let json = json_of(resp).await;
    assert_eq!(json["data"]["course_count"], 2);
    assert_eq!(json["data"]["session_count"], 3);
    assert_eq!(json["data"]["attendance_count"], 4);
}

#[tokio::test]
async fn test_per_course_rows() {
    let (app, state) = make_test_app().await;
    let ctx = seed(state.db()).await;

    let (admin_token, _) = generate_jwt(&ctx.admin);
    let resp = app
        .oneshot(authed("/api/analytics/courses", &admin_token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_of(resp).await;

    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let compilers = rows
        .iter()
        .find(|r| r["course_code"] == "CS445")
        .expect("CS445 row");
    assert_eq!(compilers["session_count"], 2);
    assert_eq!(compilers["attendance_count"], 3);
    assert_eq!(compilers["avg_attendance_per_session"], 1.5);
}

#[tokio::test]
async fn test_trends_groups_by_day() {
    let (app, state) = make_test_app().await;
    let ctx = seed(state.db()).await;

    let (grace_token, _) = generate_jwt(&ctx.grace);
    let resp = app
        .oneshot(authed("/api/analytics/trends?days=7", &grace_token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_of(resp).await;

    let rows = json["data"].as_array().unwrap();
    // everything was seeded just now, so one bucket: today
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["attendance_count"], 3);
    assert_eq!(
        rows[0]["day"],
        Utc::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn test_analytics_require_authentication() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/analytics/overview")
        .body(AxumBody::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

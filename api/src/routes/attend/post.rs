use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
};
use axum_extra::extract::TypedHeader;
use chrono::Utc;
use headers::UserAgent;
use sea_orm::DbErr;
use std::net::SocketAddr;

use crate::response::ApiResponse;
use crate::routes::attend::common::{AttendForm, TokenKind, resolve_token};
use db::models::attendance::Model as AttendanceModel;
use util::state::AppState;

/// POST /attend/{token} and POST /attend/entry/{token}
///
/// Records a check-in for the session behind an entry token.
///
/// ### Request Body
/// ```json
/// { "name": "Ada", "surname": "Lovelace", "student_id": "u20000001" }
/// ```
///
/// ### Responses
/// - `200 OK`: "Attendance recorded"; exactly one row is created
/// - `400 Bad Request`: missing name/surname, inactive session, or a
///   duplicate (session, name, surname) submission
/// - `404 Not Found`: unknown token
pub async fn check_in(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(form): Json<AttendForm>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = state.db();
    let now = Utc::now();

    let (session, course) = match resolve_token(db, &token, TokenKind::Entry).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Session not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    let ip = addr.ip().to_string();
    let ua = user_agent.map(|TypedHeader(ua)| ua.to_string());

    match AttendanceModel::check_in(
        db,
        &session,
        &course.name,
        &form.name,
        &form.surname,
        form.student_id.as_deref(),
        Some(&ip),
        ua.as_deref(),
        now,
    )
    .await
    {
        Ok(_row) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Attendance recorded")),
        ),
        Err(DbErr::Custom(m)) => (StatusCode::BAD_REQUEST, Json(ApiResponse::error(m))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to record attendance: {e}"
            ))),
        ),
    }
}

/// POST /attend/exit/{token}
///
/// Records a check-out for the session behind an exit token. Requires a
/// prior check-in for the same (name, surname); stores the exit stamp and
/// the whole-minute duration.
///
/// ### Responses
/// - `200 OK`: "Check-out recorded"
/// - `400 Bad Request`: no matching check-in, already checked out, or
///   inactive session
/// - `404 Not Found`: unknown token
pub async fn check_out(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(form): Json<AttendForm>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = state.db();
    let now = Utc::now();

    let (session, _course) = match resolve_token(db, &token, TokenKind::Exit).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Session not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    match AttendanceModel::check_out(db, &session, &form.name, &form.surname, now).await {
        Ok(_row) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Check-out recorded")),
        ),
        Err(DbErr::Custom(m)) => (StatusCode::BAD_REQUEST, Json(ApiResponse::error(m))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to record check-out: {e}"))),
        ),
    }
}

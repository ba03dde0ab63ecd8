use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::sessions::common::{
    CreateSessionRequest, SessionResponse, entry_url, exit_url, qr_public_path,
};
use db::models::course::Model as CourseModel;
use db::models::session::Model as SessionModel;
use util::{qr, state::AppState};

/// POST /api/create_session
///
/// Creates an attendance session for a course: two fresh unguessable tokens
/// are persisted and both attend URLs are rendered as QR PNGs on disk.
///
/// ### Request Body
/// ```json
/// {
///   "course_id": 1,
///   "name": "Week 3 lecture",
///   "session_date": "2026-06-01",
///   "active": true
/// }
/// ```
///
/// ### Responses
/// - `201 Created`: tokens, attend URLs and `/qr_codes/...` paths
/// - `403 Forbidden`: caller does not own the course
/// - `404 Not Found`: unknown course
///
/// A failed QR render is logged and leaves the corresponding path null; the
/// session and its tokens are still usable.
pub async fn create_session(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateSessionRequest>,
) -> (StatusCode, Json<ApiResponse<Option<SessionResponse>>>) {
    let db = state.db();

    let course = match CourseModel::get_by_id(db, req.course_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!(
                    "Course {} not found.",
                    req.course_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    if !claims.is_admin() && course.instructor_id != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("You do not own this course")),
        );
    }

    let session_date = req.session_date.unwrap_or_else(|| Utc::now().date_naive());
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| n.to_owned())
        .unwrap_or_else(|| format!("{} {}", course.name, session_date));

    let session = match SessionModel::create(
        db,
        course.id,
        &name,
        session_date,
        req.active.unwrap_or(true),
        None,
        None,
    )
    .await
    {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Failed to create session: {e}"))),
            );
        }
    };

    let mut resp = SessionResponse::from(session.clone());

    match qr::write_attend_qr(session.id, "entry", &entry_url(&session.entry_token)) {
        Ok(_) => resp.entry_qr = Some(qr_public_path(session.id, "entry")),
        Err(e) => tracing::warn!(session = session.id, error = %e, "Failed to render entry QR"),
    }
    match qr::write_attend_qr(session.id, "exit", &exit_url(&session.exit_token)) {
        Ok(_) => resp.exit_qr = Some(qr_public_path(session.id, "exit")),
        Err(e) => tracing::warn!(session = session.id, error = %e, "Failed to render exit QR"),
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(resp), "Session created")),
    )
}

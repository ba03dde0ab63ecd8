use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::response::ApiResponse;
use db::models::session::Model as SessionModel;
use util::state::AppState;

/// DELETE /api/sessions/{session_id}
///
/// Deletes a session and, by FK cascade, its attendance records. Ownership
/// is enforced by the router guard.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = state.db();

    match SessionModel::delete_by_id(db, session_id).await {
        Ok(rows) if rows > 0 => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Session deleted")),
        ),
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Session {} not found.",
                session_id
            ))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to delete session: {e}"))),
        ),
    }
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::response::ApiResponse;
use crate::routes::sessions::common::SessionResponse;
use db::models::session::Model as SessionModel;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// PUT /api/sessions/{session_id}/active
///
/// Opens or closes a session for submissions. An inactive session keeps its
/// tokens and records but rejects new check-ins and check-outs.
pub async fn set_session_active(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(req): Json<SetActiveRequest>,
) -> (StatusCode, Json<ApiResponse<Option<SessionResponse>>>) {
    let db = state.db();

    let session = match SessionModel::get_by_id(db, session_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!(
                    "Session {} not found.",
                    session_id
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

    match session.set_active(db, req.active).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(SessionResponse::from(updated)),
                "Session updated",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to update session: {e}"))),
        ),
    }
}

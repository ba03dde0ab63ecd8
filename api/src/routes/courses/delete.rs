use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::response::ApiResponse;
use db::models::course::Model as CourseModel;
use util::state::AppState;

/// DELETE /api/courses/{course_id}
///
/// Deletes a course; its sessions and their attendances go with it (FK
/// cascade, so no orphan rows). Ownership is enforced by the router guard.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = state.db();

    match CourseModel::delete_by_id(db, course_id).await {
        Ok(rows) if rows > 0 => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Course deleted")),
        ),
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Course {} not found.",
                course_id
            ))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to delete course: {e}"))),
        ),
    }
}

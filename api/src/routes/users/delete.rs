use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

use crate::response::ApiResponse;
use db::models::user::{Column as UserCol, Entity as UserEntity, Model as UserModel};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    /// When true, owned courses (and their sessions/attendances) go too.
    pub force: Option<bool>,
}

/// DELETE /api/users/{user_id}?force=true
///
/// Deletes a user. A user who still owns courses is protected: the request is
/// refused with `409 Conflict` unless `force=true`, in which case the owned
/// courses cascade away with their sessions and attendances.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(q): Query<DeleteUserQuery>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = state.db();

    match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("User {} not found.", user_id))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    }

    match UserModel::owns_courses(db, user_id).await {
        Ok(true) if !q.force.unwrap_or(false) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "User still owns courses; pass force=true to delete them as well",
                )),
            );
        }
        Ok(_) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    }

    // FK cascade removes owned courses, their sessions and attendances.
    let res = UserEntity::delete_many()
        .filter(UserCol::Id.eq(user_id))
        .exec(db)
        .await;

    match res {
        Ok(dr) if dr.rows_affected > 0 => {
            (StatusCode::OK, Json(ApiResponse::success((), "User deleted")))
        }
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("User {} not found.", user_id))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to delete user: {e}"))),
        ),
    }
}

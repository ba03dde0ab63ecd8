use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{EntityTrait, QueryOrder};

use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;
use db::models::user::{Column as UserCol, Entity as UserEntity};
use util::state::AppState;

/// GET /api/users
///
/// Lists all users. Admin-only (enforced by the router layer). Password
/// hashes never leave the database layer.
pub async fn list_users(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<UserResponse>>>) {
    let db = state.db();

    match UserEntity::find().order_by_asc(UserCol::Id).all(db).await {
        Ok(users) => {
            let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Users retrieved")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

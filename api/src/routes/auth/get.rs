use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use util::state::AppState;

/// GET /api/me
///
/// Returns the authenticated user's profile as currently stored, not as
/// captured in the token (the claims may lag a rename).
pub async fn me(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Option<UserResponse>>>) {
    let db = state.db();

    match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(user.into()),
                "User data retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User no longer exists")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

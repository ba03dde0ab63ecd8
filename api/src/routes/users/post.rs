use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::users::common::{CreateUserRequest, UserResponse};
use db::models::user::{Model as UserModel, Role};
use util::state::AppState;

/// POST /api/users
///
/// Creates a user. Admin-only access; this is also the only endpoint that can
/// mint another admin.
///
/// ### Request Body
/// ```json
/// {
///   "username": "grace",
///   "password": "securepassword",
///   "role": "instructor",
///   "full_name": "Grace Hopper",
///   "email": "grace@example.edu"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`: full user object (excluding password)
/// - `400 Bad Request`: validation failure or unknown role
/// - `409 Conflict`: duplicate username
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let Ok(role) = Role::from_str(&req.role) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                "Role must be 'admin' or 'instructor'",
            )),
        )
            .into_response();
    };

    let db = state.db();

    match UserModel::create(
        db,
        &req.username,
        &req.password,
        role,
        &req.full_name,
        req.email.as_deref(),
    )
    .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::<UserResponse>::success(
                user.into(),
                "User created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            if e.to_string().contains("UNIQUE constraint failed") {
                (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<()>::error(
                        "A user with this username already exists",
                    )),
                )
                    .into_response()
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
                )
                    .into_response()
            }
        }
    }
}

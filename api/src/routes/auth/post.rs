use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use axum::Extension;
use db::models::user::Model as UserModel;
use util::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/login
///
/// Authenticate a user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "grace",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "grace",
///     "full_name": "Grace Hopper",
///     "role": "instructor",
///     "token": "jwt_token_here",
///     "expires_at": "2026-06-01T11:00:00Z"
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `401 Unauthorized`: unknown username or wrong password (the message is
///   identical for both so the endpoint is not a username oracle)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        );
    }

    let db = state.db();

    match UserModel::verify_credentials(db, &req.username, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(&user);
            let data = LoginResponse {
                id: user.id,
                username: user.username,
                full_name: user.full_name,
                role: user.role.to_string(),
                token,
                expires_at,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Login successful")),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error(
                "Invalid username or password",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<LoginResponse>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

/// POST /api/logout
///
/// Tokens are stateless, so logout is an acknowledgement: the client discards
/// its token. Requires a valid token so a logged-out client notices stale
/// credentials immediately.
pub async fn logout(
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    tracing::info!(user = claims.sub, "User logged out");
    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Logged out")),
    )
}

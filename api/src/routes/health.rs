use crate::response::ApiResponse;
use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};
use util::{config, state::AppState};

/// GET /api/health
///
/// Liveness probe; reports the configured project name.
async fn health() -> (StatusCode, Json<ApiResponse<Value>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({ "service": config::project_name() }),
            "Service is up",
        )),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

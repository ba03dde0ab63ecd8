//! # Analytics Routes Module
//!
//! Read-only dashboard aggregates under `/api/analytics`. Instructors see
//! numbers for their own courses; admins see the whole installation.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/overview", get(get::overview))
        .route("/courses", get(get::per_course))
        .route("/trends", get(get::trends))
}

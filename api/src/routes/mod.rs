//! HTTP route entry points.
//!
//! `routes()` builds the `/api` namespace; `public_routes()` builds the
//! unauthenticated surface (the tokenized attend pages and QR image files).
//!
//! Route groups under `/api`:
//! - `/health` → liveness probe (public)
//! - `/login`, `/logout`, `/me` → authentication
//! - `/users` → user management (admin-only)
//! - `/courses` → course CRUD and per-course session listing (instructors see
//!   their own courses, admins see all)
//! - `/create_session`, `/sessions` → session lifecycle, CSV export
//! - `/analytics` → dashboard aggregates

use crate::auth::guards::{
    require_admin, require_authenticated, require_course_owner, require_session_owner,
};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod analytics;
pub mod attend;
pub mod auth;
pub mod common;
pub mod courses;
pub mod health;
pub mod qr;
pub mod sessions;
pub mod users;

/// Builds the `/api` router.
///
/// Per-route guards follow the same pattern as the route groups: admin-only
/// groups get `require_admin`, ownership-scoped routes get the stateful
/// course/session owner guards.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .route("/login", post(auth::post::login))
        .route(
            "/logout",
            post(auth::post::logout).route_layer(from_fn(require_authenticated)),
        )
        .route(
            "/me",
            get(auth::get::me).route_layer(from_fn(require_authenticated)),
        )
        .nest(
            "/users",
            users::users_routes().route_layer(from_fn(require_admin)),
        )
        .nest("/courses", courses_group(app_state.clone()))
        .route(
            "/create_session",
            post(sessions::post::create_session).route_layer(from_fn(require_authenticated)),
        )
        .nest("/sessions", sessions_group(app_state.clone()))
        .nest(
            "/analytics",
            analytics::analytics_routes().route_layer(from_fn(require_authenticated)),
        )
        .with_state(app_state)
}

fn courses_group(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(courses::get::list_courses).route_layer(from_fn(require_authenticated)),
        )
        .route(
            "/",
            post(courses::post::create_course).route_layer(from_fn(require_authenticated)),
        )
        .route(
            "/{course_id}",
            delete(courses::delete::delete_course)
                .route_layer(from_fn_with_state(app_state.clone(), require_course_owner)),
        )
        .route(
            "/{course_id}/sessions",
            get(sessions::get::list_course_sessions)
                .route_layer(from_fn_with_state(app_state.clone(), require_course_owner)),
        )
}

fn sessions_group(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/{session_id}",
            delete(sessions::delete::delete_session)
                .route_layer(from_fn_with_state(app_state.clone(), require_session_owner)),
        )
        .route(
            "/{session_id}/active",
            put(sessions::put::set_session_active)
                .route_layer(from_fn_with_state(app_state.clone(), require_session_owner)),
        )
        .route(
            "/{session_id}/export_csv",
            get(sessions::get::export_session_csv)
                .route_layer(from_fn_with_state(app_state.clone(), require_session_owner)),
        )
        .route(
            "/{session_id}/attendances",
            get(sessions::get::list_session_attendances)
                .route_layer(from_fn_with_state(app_state.clone(), require_session_owner)),
        )
}

/// Builds the unauthenticated router: student-facing attend pages and the
/// generated QR images.
pub fn public_routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/attend", attend::attend_routes())
        .route("/qr_codes/{file}", get(qr::serve_qr_code))
        .with_state(app_state)
}

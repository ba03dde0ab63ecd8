//! # Users Routes Module
//!
//! Defines and wires up routes for the `/api/users` endpoint group.
//!
//! ## Structure
//! - `get.rs` — GET handlers (list users)
//! - `post.rs` — POST handlers (create user)
//! - `delete.rs` — DELETE handlers (delete user, optionally cascading)
//!
//! ## Middleware
//! The whole group is mounted behind `require_admin` in `routes::routes`.

use axum::{
    Router,
    routing::{delete, get, post},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

/// Builds the `/users` route group, mapping HTTP methods to handlers.
///
/// - `GET /users` → `list_users`
/// - `POST /users` → `create_user`
/// - `DELETE /users/{user_id}` → `delete_user`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_users))
        .route("/", post(post::create_user))
        .route("/{user_id}", delete(delete::delete_user))
}

//! # Attend Routes Module
//!
//! The unauthenticated, student-facing surface. A scanned QR lands on
//! `GET /attend/{token}` (entry) or `GET /attend/exit/{token}` (exit), which
//! render a minimal HTML form; the form posts JSON back to the same URL.
//!
//! `/attend/entry/{token}` is an alias of `/attend/{token}` kept for QR codes
//! printed by older clients.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

pub fn attend_routes() -> Router<AppState> {
    Router::new()
        .route("/{token}", get(get::entry_form).post(post::check_in))
        .route("/entry/{token}", get(get::entry_form).post(post::check_in))
        .route("/exit/{token}", get(get::exit_form).post(post::check_out))
}

//! # Sessions Routes Module
//!
//! Handlers for session lifecycle and export:
//! - `post.rs` — `POST /api/create_session` (tokens + QR images)
//! - `get.rs` — per-course listing, attendance records, CSV export
//! - `put.rs` — toggle the active flag
//! - `delete.rs` — delete a session (cascades to attendances)
//!
//! Wiring and ownership guards live in `routes::routes`.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

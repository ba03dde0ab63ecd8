//! # Courses Routes Module
//!
//! Handlers for the `/api/courses` endpoint group.
//!
//! ## Structure
//! - `get.rs` — list courses (scoped per caller)
//! - `post.rs` — create a course
//! - `delete.rs` — delete a course (cascades to sessions and attendances)
//!
//! Routes are wired and guarded in `routes::routes`; the delete and
//! per-course session routes sit behind the course-ownership guard.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

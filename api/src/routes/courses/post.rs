use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::EntityTrait;
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::courses::common::{CourseResponse, CreateCourseRequest};
use db::models::course::Model as CourseModel;
use db::models::user::Entity as UserEntity;
use util::state::AppState;

/// POST /api/courses
///
/// Creates a course owned by the caller. An admin may pass `instructor_id`
/// to assign the course to someone else; instructors always own what they
/// create.
///
/// ### Responses
/// - `201 Created`: the new course
/// - `400 Bad Request`: validation failure
/// - `403 Forbidden`: non-admin tried to assign another owner
/// - `404 Not Found`: assigned instructor does not exist
pub async fn create_course(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let db = state.db();

    let instructor_id = match req.instructor_id {
        Some(other) if other != claims.sub => {
            if !claims.is_admin() {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ApiResponse::<()>::error(
                        "Only admins may assign courses to another instructor",
                    )),
                )
                    .into_response();
            }
            match UserEntity::find_by_id(other).one(db).await {
                Ok(Some(_)) => other,
                Ok(None) => {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(ApiResponse::<()>::error(format!(
                            "Instructor {} not found.",
                            other
                        ))),
                    )
                        .into_response();
                }
                Err(e) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
                    )
                        .into_response();
                }
            }
        }
        _ => claims.sub,
    };

    match CourseModel::create(
        db,
        &req.name,
        &req.code,
        req.description.as_deref(),
        req.max_students.unwrap_or(50),
        instructor_id,
    )
    .await
    {
        Ok(course) => (
            StatusCode::CREATED,
            Json(ApiResponse::<CourseResponse>::success(
                course.into(),
                "Course created successfully",
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!(
                "Failed to create course: {e}"
            ))),
        )
            .into_response(),
    }
}

use axum::{Extension, Json, extract::State, http::StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use std::collections::HashMap;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::CourseResponse;
use db::models::course::Model as CourseModel;
use db::models::session::{Column as SessionCol, Entity as SessionEntity};
use util::state::AppState;

#[derive(FromQueryResult)]
struct SessionCountRow {
    course_id: i64,
    cnt: i64,
}

/// Session counts for a set of courses, one grouped query.
async fn session_counts(
    db: &sea_orm::DatabaseConnection,
    course_ids: &[i64],
) -> Result<HashMap<i64, i64>, sea_orm::DbErr> {
    if course_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<SessionCountRow> = SessionEntity::find()
        .select_only()
        .column(SessionCol::CourseId)
        .column_as(SessionCol::Id.count(), "cnt")
        .filter(SessionCol::CourseId.is_in(course_ids.iter().copied()))
        .group_by(SessionCol::CourseId)
        .into_model::<SessionCountRow>()
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| (r.course_id, r.cnt)).collect())
}

/// GET /api/courses
///
/// Lists courses with a per-course session count. Instructors see only the
/// courses they own; admins see everything.
pub async fn list_courses(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<CourseResponse>>>) {
    let db = state.db();

    let courses = if claims.is_admin() {
        CourseModel::list_all(db).await
    } else {
        CourseModel::list_for_instructor(db, claims.sub).await
    };

    let courses = match courses {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
    let counts = session_counts(db, &ids).await.unwrap_or_default();

    let data = courses
        .into_iter()
        .map(|c| {
            let n = *counts.get(&c.id).unwrap_or(&0);
            CourseResponse::from_with_count(c, n)
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(data, "Courses retrieved")),
    )
}

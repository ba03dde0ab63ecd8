//! Dashboard aggregates: grouped counts over sessions and attendances.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use db::models::attendance::{self, Entity as AttEntity};
use db::models::course::{Column as CourseCol, Entity as CourseEntity, Model as CourseModel};
use db::models::session::{Column as SessionCol, Entity as SessionEntity};
use sea_orm::sea_query::Expr;
use util::state::AppState;

/// Course scope of the caller: `None` means unrestricted (admin).
async fn scoped_course_ids(
    db: &DatabaseConnection,
    claims: &crate::auth::Claims,
) -> Result<Option<Vec<i64>>, DbErr> {
    if claims.is_admin() {
        return Ok(None);
    }
    let ids = CourseEntity::find()
        .filter(CourseCol::InstructorId.eq(claims.sub))
        .all(db)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    Ok(Some(ids))
}

#[derive(Debug, Serialize, Default)]
pub struct OverviewResponse {
    pub course_count: i64,
    pub session_count: i64,
    pub attendance_count: i64,
    pub avg_attendance_per_session: f64,
}

/// GET /api/analytics/overview
///
/// Headline totals for the caller's courses.
pub async fn overview(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<OverviewResponse>>) {
    let db = state.db();

    let result: Result<OverviewResponse, DbErr> = async {
        let scope = scoped_course_ids(db, &claims).await?;

        let mut course_q = CourseEntity::find();
        let mut session_q = SessionEntity::find();
        let mut att_q =
            AttEntity::find().join(JoinType::InnerJoin, attendance::Relation::Session.def());

        if let Some(ids) = &scope {
            course_q = course_q.filter(CourseCol::Id.is_in(ids.iter().copied()));
            session_q = session_q.filter(SessionCol::CourseId.is_in(ids.iter().copied()));
            att_q = att_q.filter(SessionCol::CourseId.is_in(ids.iter().copied()));
        }

        let course_count = course_q.count(db).await? as i64;
        let session_count = session_q.count(db).await? as i64;
        let attendance_count = att_q.count(db).await? as i64;

        let avg = if session_count > 0 {
            attendance_count as f64 / session_count as f64
        } else {
            0.0
        };

        Ok(OverviewResponse {
            course_count,
            session_count,
            attendance_count,
            avg_attendance_per_session: (avg * 100.0).round() / 100.0,
        })
    }
    .await;

    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Analytics retrieved")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

#[derive(FromQueryResult)]
struct GroupedCountRow {
    group_id: i64,
    cnt: i64,
}

#[derive(Debug, Serialize)]
pub struct CourseAnalyticsRow {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub session_count: i64,
    pub attendance_count: i64,
    pub avg_attendance_per_session: f64,
}

/// GET /api/analytics/courses
///
/// Per-course session and attendance counts, one grouped query each.
pub async fn per_course(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<CourseAnalyticsRow>>>) {
    let db = state.db();

    let result: Result<Vec<CourseAnalyticsRow>, DbErr> = async {
        let courses = if claims.is_admin() {
            CourseModel::list_all(db).await?
        } else {
            CourseModel::list_for_instructor(db, claims.sub).await?
        };
        let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let session_rows: Vec<GroupedCountRow> = SessionEntity::find()
            .select_only()
            .column_as(SessionCol::CourseId, "group_id")
            .column_as(SessionCol::Id.count(), "cnt")
            .filter(SessionCol::CourseId.is_in(ids.iter().copied()))
            .group_by(SessionCol::CourseId)
            .into_model::<GroupedCountRow>()
            .all(db)
            .await?;
        let session_counts: HashMap<i64, i64> =
            session_rows.into_iter().map(|r| (r.group_id, r.cnt)).collect();

        let att_rows: Vec<GroupedCountRow> = AttEntity::find()
            .select_only()
            .column_as(SessionCol::CourseId, "group_id")
            .column_as(attendance::Column::Id.count(), "cnt")
            .join(JoinType::InnerJoin, attendance::Relation::Session.def())
            .filter(SessionCol::CourseId.is_in(ids.iter().copied()))
            .group_by(SessionCol::CourseId)
            .into_model::<GroupedCountRow>()
            .all(db)
            .await?;
        let att_counts: HashMap<i64, i64> =
            att_rows.into_iter().map(|r| (r.group_id, r.cnt)).collect();

        Ok(courses
            .into_iter()
            .map(|c| {
                let sessions = *session_counts.get(&c.id).unwrap_or(&0);
                let attendance = *att_counts.get(&c.id).unwrap_or(&0);
                let avg = if sessions > 0 {
                    (attendance as f64 / sessions as f64 * 100.0).round() / 100.0
                } else {
                    0.0
                };
                CourseAnalyticsRow {
                    course_id: c.id,
                    course_name: c.name,
                    course_code: c.code,
                    session_count: sessions,
                    attendance_count: attendance,
                    avg_attendance_per_session: avg,
                }
            })
            .collect())
    }
    .await;

    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Analytics retrieved")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    /// Window size in days; default 14, clamped to 1..=90.
    pub days: Option<i64>,
}

#[derive(FromQueryResult)]
struct TrendDbRow {
    day: String,
    cnt: i64,
}

#[derive(Debug, Serialize)]
pub struct TrendRow {
    pub day: String,
    pub attendance_count: i64,
}

/// GET /api/analytics/trends?days=N
///
/// Attendance counts grouped by calendar day of check-in over the window.
/// Days without submissions are omitted.
pub async fn trends(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(q): Query<TrendsQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<TrendRow>>>) {
    let db = state.db();
    let days = q.days.unwrap_or(14).clamp(1, 90);
    let cutoff = Utc::now() - Duration::days(days);

    let result: Result<Vec<TrendRow>, DbErr> = async {
        let scope = scoped_course_ids(db, &claims).await?;

        let mut sel = AttEntity::find()
            .select_only()
            .column_as(Expr::cust("DATE(entry_time)"), "day")
            .column_as(attendance::Column::Id.count(), "cnt")
            .join(JoinType::InnerJoin, attendance::Relation::Session.def())
            .filter(attendance::Column::EntryTime.gte(cutoff))
            .group_by(Expr::cust("DATE(entry_time)"))
            .order_by_asc(Expr::cust("DATE(entry_time)"));

        if let Some(ids) = &scope {
            sel = sel.filter(SessionCol::CourseId.is_in(ids.iter().copied()));
        }

        let rows: Vec<TrendDbRow> = sel.into_model::<TrendDbRow>().all(db).await?;
        Ok(rows
            .into_iter()
            .map(|r| TrendRow {
                day: r.day,
                attendance_count: r.cnt,
            })
            .collect())
    }
    .await;

    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Analytics retrieved")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

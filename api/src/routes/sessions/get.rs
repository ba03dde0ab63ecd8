//! Sessions: read-only routes (per-course listing, attendance records,
//! CSV export).

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
};
use chrono::{SecondsFormat, Utc};
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use std::collections::HashMap;

use crate::response::ApiResponse;
use crate::routes::sessions::common::SessionResponse;
use db::models::attendance::{Column as AttCol, Entity as AttEntity, Model as AttendanceModel};
use db::models::session::Model as SessionModel;
use util::state::AppState;

#[derive(FromQueryResult)]
struct AttendanceCountRow {
    session_id: i64,
    cnt: i64,
}

/// Attendance counts for a set of sessions, one grouped query.
async fn attendance_counts(
    db: &sea_orm::DatabaseConnection,
    session_ids: &[i64],
) -> Result<HashMap<i64, i64>, sea_orm::DbErr> {
    if session_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<AttendanceCountRow> = AttEntity::find()
        .select_only()
        .column(AttCol::SessionId)
        .column_as(AttCol::Id.count(), "cnt")
        .filter(AttCol::SessionId.is_in(session_ids.iter().copied()))
        .group_by(AttCol::SessionId)
        .into_model::<AttendanceCountRow>()
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| (r.session_id, r.cnt)).collect())
}

/// GET /api/courses/{course_id}/sessions
///
/// Lists a course's sessions, newest first, each with its attendance count.
/// Ownership is enforced by the router guard.
pub async fn list_course_sessions(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<SessionResponse>>>) {
    let db = state.db();

    let sessions = match SessionModel::list_for_course(db, course_id).await {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
    let counts = attendance_counts(db, &ids).await.unwrap_or_default();

    let data = sessions
        .into_iter()
        .map(|s| {
            let n = *counts.get(&s.id).unwrap_or(&0);
            SessionResponse::from_with_count(s, n)
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(data, "Sessions retrieved")),
    )
}

/// A single attendance record (DTO) for API responses.
#[derive(serde::Serialize)]
pub struct AttendanceRecordDto {
    pub id: i64,
    pub session_id: i64,
    pub name: String,
    pub surname: String,
    pub student_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub course_name: String,
    pub status: String,
    pub entry_time: String,
    pub exit_time: Option<String>,
    pub duration_minutes: Option<i64>,
}

impl From<db::models::attendance::Model> for AttendanceRecordDto {
    fn from(r: db::models::attendance::Model) -> Self {
        Self {
            id: r.id,
            session_id: r.session_id,
            name: r.name,
            surname: r.surname,
            student_id: r.student_id,
            ip_address: r.ip_address,
            user_agent: r.user_agent,
            course_name: r.course_name,
            status: r.status.to_string(),
            entry_time: r
                .entry_time
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            exit_time: r
                .exit_time
                .map(|t| t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)),
            duration_minutes: r.duration_minutes,
        }
    }
}

/// GET /api/sessions/{session_id}/attendances
///
/// Lists attendance records for a session, oldest check-in first.
pub async fn list_session_attendances(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<AttendanceRecordDto>>>) {
    let db = state.db();

    match AttendanceModel::list_for_session(db, session_id).await {
        Ok(rows) => {
            let data: Vec<AttendanceRecordDto> =
                rows.into_iter().map(AttendanceRecordDto::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Attendance records retrieved")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

/// GET /api/sessions/{session_id}/export_csv
///
/// Export all attendance records for a session as a CSV attachment with
/// columns:
/// `id,name,surname,student_id,ip_address,entry_time,exit_time,duration_minutes,device,course_name`
pub async fn export_session_csv(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, (HeaderMap, String)) {
    let db = state.db();

    let records = match AttendanceModel::list_for_session(db, session_id).await {
        Ok(v) => v,
        Err(_) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                axum::http::header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                (headers, "error".to_string()),
            );
        }
    };

    // CSV header
    let mut csv = String::from(
        "id,name,surname,student_id,ip_address,entry_time,exit_time,duration_minutes,device,course_name\n",
    );

    fn esc(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    for r in records {
        let entry_iso = r
            .entry_time
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let exit_iso = r
            .exit_time
            .map(|t| t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        let duration = r.duration_minutes.map(|d| d.to_string()).unwrap_or_default();

        let row = format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            r.id,
            esc(&r.name),
            esc(&r.surname),
            esc(&r.student_id.unwrap_or_default()),
            esc(&r.ip_address.unwrap_or_default()),
            esc(&entry_iso),
            esc(&exit_iso),
            duration,
            esc(&r.user_agent.unwrap_or_default()),
            esc(&r.course_name),
        );
        csv.push_str(&row);
    }

    let filename = format!("attendance_session_{}.csv", session_id);

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        axum::http::header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, (headers, csv))
}

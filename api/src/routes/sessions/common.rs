use chrono::NaiveDate;
use db::models::session::Model as Session;
use serde::{Deserialize, Serialize};
use util::{config, paths};

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub course_id: i64,
    /// Defaults to "{course name} {date}".
    pub name: Option<String>,
    /// Defaults to today (UTC).
    pub session_date: Option<NaiveDate>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub session_date: String,
    pub active: bool,
    pub entry_token: String,
    pub exit_token: String,
    pub entry_url: String,
    pub exit_url: String,
    /// Public path of the rendered QR image, when rendering succeeded.
    pub entry_qr: Option<String>,
    pub exit_qr: Option<String>,
    pub attendance_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Absolute attend URL for an entry token (what the entry QR encodes).
pub fn entry_url(token: &str) -> String {
    format!(
        "{}/attend/{}",
        config::public_base_url().trim_end_matches('/'),
        token
    )
}

/// Absolute attend URL for an exit token (what the exit QR encodes).
pub fn exit_url(token: &str) -> String {
    format!(
        "{}/attend/exit/{}",
        config::public_base_url().trim_end_matches('/'),
        token
    )
}

/// Public serving path of a QR file, as returned to clients.
pub fn qr_public_path(session_id: i64, kind: &str) -> String {
    format!("/qr_codes/{}", paths::qr_file_name(session_id, kind))
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        let entry_url = entry_url(&s.entry_token);
        let exit_url = exit_url(&s.exit_token);
        Self {
            id: s.id,
            course_id: s.course_id,
            name: s.name,
            session_date: s.session_date.to_string(),
            active: s.active,
            entry_token: s.entry_token,
            exit_token: s.exit_token,
            entry_url,
            exit_url,
            entry_qr: None,
            exit_qr: None,
            attendance_count: 0,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

impl SessionResponse {
    pub fn from_with_count(s: Session, attendance_count: i64) -> Self {
        let mut base = Self::from(s);
        base.attendance_count = attendance_count;
        base
    }
}

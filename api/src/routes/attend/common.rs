use serde::Deserialize;

use db::models::{course, session};
use sea_orm::{DatabaseConnection, DbErr};

#[derive(Debug, Deserialize)]
pub struct AttendForm {
    pub name: String,
    pub surname: String,
    pub student_id: Option<String>,
}

/// Which half of the entry/exit pair a page serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Entry,
    Exit,
}

/// Resolves token → session → course.
///
/// Returns `Ok(None)` for an unknown token so handlers can 404 without
/// leaking whether the token ever existed.
pub async fn resolve_token(
    db: &DatabaseConnection,
    token: &str,
    kind: TokenKind,
) -> Result<Option<(session::Model, course::Model)>, DbErr> {
    let session = match kind {
        TokenKind::Entry => session::Model::find_by_entry_token(db, token).await?,
        TokenKind::Exit => session::Model::find_by_exit_token(db, token).await?,
    };
    let Some(session) = session else {
        return Ok(None);
    };

    let Some(course) = course::Model::get_by_id(db, session.course_id).await? else {
        return Ok(None);
    };

    Ok(Some((session, course)))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the public attendance form.
///
/// Deliberately framework-free HTML: the page is opened from a phone camera
/// and must work without any frontend build.
pub fn render_form(kind: TokenKind, session: &session::Model, course: &course::Model) -> String {
    let (title, action_word) = match kind {
        TokenKind::Entry => ("Check in", "Check in"),
        TokenKind::Exit => ("Check out", "Check out"),
    };
    let course_name = escape_html(&course.name);
    let session_name = escape_html(&session.name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - {course_name}</title>
<style>
  body {{ font-family: sans-serif; max-width: 26rem; margin: 2rem auto; padding: 0 1rem; }}
  label {{ display: block; margin-top: 1rem; }}
  input {{ width: 100%; padding: .5rem; margin-top: .25rem; }}
  button {{ margin-top: 1.5rem; padding: .6rem 1.2rem; }}
  #result {{ margin-top: 1rem; font-weight: bold; }}
</style>
</head>
<body>
<h1>{course_name}</h1>
<h2>{session_name}</h2>
<p>{title} by entering your details below.</p>
<form id="attend-form">
  <label>Name <input name="name" required></label>
  <label>Surname <input name="surname" required></label>
  <label>Student number (optional) <input name="student_id"></label>
  <button type="submit">{action_word}</button>
</form>
<p id="result"></p>
<script>
document.getElementById('attend-form').addEventListener('submit', async (e) => {{
  e.preventDefault();
  const form = new FormData(e.target);
  const body = {{
    name: form.get('name'),
    surname: form.get('surname'),
    student_id: form.get('student_id') || null
  }};
  const resp = await fetch(window.location.pathname, {{
    method: 'POST',
    headers: {{ 'Content-Type': 'application/json' }},
    body: JSON.stringify(body)
  }});
  const json = await resp.json();
  document.getElementById('result').textContent = json.message;
}});
</script>
</body>
</html>
"#
    )
}

/// Error page for unknown or retired tokens.
pub fn render_not_found() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Not found</title></head>
<body style="font-family: sans-serif; max-width: 26rem; margin: 2rem auto;">
<h1>Session not found</h1>
<p>This attendance link is not valid. Ask your instructor for a fresh QR code.</p>
</body>
</html>
"#
    .to_string()
}

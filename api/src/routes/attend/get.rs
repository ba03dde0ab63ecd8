use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use crate::routes::attend::common::{TokenKind, render_form, render_not_found, resolve_token};
use util::state::AppState;

async fn form_for(
    state: AppState,
    token: String,
    kind: TokenKind,
) -> (StatusCode, Html<String>) {
    let db = state.db();

    match resolve_token(db, &token, kind).await {
        Ok(Some((session, course))) => {
            (StatusCode::OK, Html(render_form(kind, &session, &course)))
        }
        Ok(None) => (StatusCode::NOT_FOUND, Html(render_not_found())),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<h1>Server error</h1><p>{e}</p>")),
        ),
    }
}

/// GET /attend/{token} and GET /attend/entry/{token}
///
/// Renders the check-in form for a session's entry token.
pub async fn entry_form(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> (StatusCode, Html<String>) {
    form_for(state, token, TokenKind::Entry).await
}

/// GET /attend/exit/{token}
///
/// Renders the check-out form for a session's exit token.
pub async fn exit_form(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> (StatusCode, Html<String>) {
    form_for(state, token, TokenKind::Exit).await
}

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::{
    course::Entity as CourseEntity,
    session::Entity as SessionEntity,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::HashMap;
use util::state::AppState;

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardError = (StatusCode, Json<ApiResponse<Empty>>);

/// Helper to extract and validate the user from request parts, then insert
/// the `AuthUser` back into the request extensions for downstream handlers.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn require_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

fn parse_path_id(params: &HashMap<String, String>, key: &str) -> Result<i64, GuardError> {
    params.get(key).and_then(|s| s.parse::<i64>().ok()).ok_or((
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(format!("Missing or invalid {key}"))),
    ))
}

/// Resolves a course and checks the caller owns it (or is an admin).
async fn check_course_ownership(
    db: &DatabaseConnection,
    course_id: i64,
    user: &AuthUser,
) -> Result<(), GuardError> {
    let course = CourseEntity::find_by_id(course_id)
        .one(db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error while checking course")),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Course {} not found.", course_id))),
        ))?;

    if user.0.is_admin() || course.instructor_id == user.0.sub {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("You do not own this course")),
        ))
    }
}

/// Guard for routes carrying `{course_id}`: the caller must be the owning
/// instructor, or an admin.
pub async fn require_course_owner(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let db = app_state.db();

    let (req, user) = extract_and_insert_authuser(req).await?;
    let course_id = parse_path_id(&params, "course_id")?;

    check_course_ownership(db, course_id, &user).await?;
    Ok(next.run(req).await)
}

/// Guard for routes carrying `{session_id}`: resolves the session's course
/// and applies the same ownership rule as `require_course_owner`.
pub async fn require_session_owner(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let db = app_state.db();

    let (req, user) = extract_and_insert_authuser(req).await?;
    let session_id = parse_path_id(&params, "session_id")?;

    let session = SessionEntity::find_by_id(session_id)
        .one(db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error while checking session")),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Session {} not found.",
                session_id
            ))),
        ))?;

    check_course_ownership(db, session.course_id, &user).await?;
    Ok(next.run(req).await)
}

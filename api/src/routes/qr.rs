use axum::{
    Json,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use util::paths;

/// GET /qr_codes/{file}
///
/// Serves a generated QR image from the QR storage root. Filenames are flat
/// (`session_{id}_{kind}.png`); anything that looks like a path is rejected.
pub async fn serve_qr_code(Path(file): Path<String>) -> Response {
    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error("Invalid file name")),
        )
            .into_response();
    }

    let path = paths::qr_storage_root().join(&file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("QR image not found")),
        )
            .into_response(),
    }
}

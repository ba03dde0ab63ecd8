//! QR bitmap rendering for attend links.
//!
//! Each domain session gets two scannable images (entry and exit). The
//! encoded payload is the absolute attend URL; files land under the
//! configured QR storage root with a predictable name so the public
//! `/qr_codes/{file}` route can serve them back.

use crate::paths;
use image::Luma;
use qrcode::QrCode;
use std::{io, path::Path, path::PathBuf};

/// Render `url` as a QR PNG at `path`.
pub fn render_to_file(url: &str, path: &Path) -> io::Result<()> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let img = code.render::<Luma<u8>>().min_dimensions(320, 320).build();
    img.save(path)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(())
}

/// Render the attend URL for a session token into the QR storage root.
///
/// `kind` is `entry` or `exit`. Returns the written path.
pub fn write_attend_qr(session_id: i64, kind: &str, url: &str) -> io::Result<PathBuf> {
    let dir = paths::ensure_dir(paths::qr_storage_root())?;
    let path = dir.join(paths::qr_file_name(session_id, kind));
    render_to_file(url, &path)?;
    Ok(path)
}

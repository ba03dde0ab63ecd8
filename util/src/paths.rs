use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// QR storage root (absolute), from `config::qr_storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn qr_storage_root() -> PathBuf {
    let root = config::qr_storage_root();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Predictable filename of a session's QR image: `session_{id}_{kind}.png`.
///
/// `kind` is `entry` or `exit`; the public route serves the file by this name.
pub fn qr_file_name(session_id: i64, kind: &str) -> String {
    format!("session_{session_id}_{kind}.png")
}

/// Full on-disk path of a session's QR image (does not create).
pub fn qr_code_path(session_id: i64, kind: &str) -> PathBuf {
    qr_storage_root().join(qr_file_name(session_id, kind))
}

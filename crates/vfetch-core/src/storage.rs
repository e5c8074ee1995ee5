//! File lifecycle around one attempt: stage to `.part`, promote, or discard.

use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the rename into place.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the staging file: appends `.part` to the final path
/// (e.g. `setup.exe` → `setup.exe.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates the parent directory of `path` if it is missing.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// Renames the staged file over `final_path`, replacing any previous file.
pub fn promote(staged: &Path, final_path: &Path) -> io::Result<()> {
    // rename() refuses to replace an existing file on Windows.
    if cfg!(windows) && final_path.exists() {
        std::fs::remove_file(final_path)?;
    }
    std::fs::rename(staged, final_path)
}

/// Removes `path` if present. Failures are logged, not returned.
pub fn discard(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "could not remove file: {}", e),
    }
}

//! Filename derivation for requests that omit a destination.
//!
//! The destination name comes from the last path segment of the first
//! candidate source, with the query string removed and the result sanitized.

mod path;
mod sanitize;

pub use path::filename_from_locator;
pub use sanitize::sanitize_filename;

/// Fallback filename when the locator yields nothing usable.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe local filename from a source locator.
///
/// - `derive_filename("https://example.com/vc_redist.x64.exe?sig=1")` → `"vc_redist.x64.exe"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(locator: &str) -> String {
    let raw = match filename_from_locator(locator) {
        Some(s) => s,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

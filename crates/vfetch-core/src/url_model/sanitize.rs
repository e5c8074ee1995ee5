//! Portable filename sanitization.
//!
//! Artifacts land on Linux build hosts and on Windows deployment shares, so
//! the result has to be legal on both.

/// Device names Windows refuses as file stems, regardless of extension.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes a candidate filename for use on both Linux and Windows.
///
/// - Replaces NUL, control characters, whitespace and `< > : " / \ | ? *` with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots, spaces and underscores
/// - Prefixes Windows device names (`CON`, `nul.txt`, ...) with `_`
/// - Limits length to 255 bytes
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let bad = c.is_control()
            || c.is_whitespace()
            || matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*');
        if bad || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or("");
    let mut result = if WINDOWS_RESERVED
        .iter()
        .any(|r| r.eq_ignore_ascii_case(stem))
    {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    };

    if result.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !result.is_char_boundary(take) {
            take -= 1;
        }
        result.truncate(take);
    }
    result
}

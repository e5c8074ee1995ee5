//! Filename extraction from a source locator.

/// Extracts the last path segment of `locator` for use as a filename hint.
///
/// Everything from the first `?` on is dropped before the path is inspected.
/// Locators that do not parse as URLs (UNC shares, bare paths) are split on
/// `/` and `\`. Returns `None` when no non-empty segment remains.
pub fn filename_from_locator(locator: &str) -> Option<String> {
    let without_query = locator.split('?').next().unwrap_or("").trim();
    if without_query.is_empty() {
        return None;
    }

    let parsed = url::Url::parse(without_query)
        .ok()
        .filter(|u| u.scheme().len() > 1);

    let segment = match parsed {
        Some(u) => u.path_segments()?.rfind(|s| !s.is_empty())?.to_string(),
        // Drive letters parse as one-letter schemes; treat those as plain paths too.
        None => without_query
            .rsplit(|c: char| c == '/' || c == '\\')
            .find(|s| !s.is_empty())?
            .to_string(),
    };

    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

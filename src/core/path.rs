//! Pure string helpers for request paths. No IO happens here.

/// Collapse every run of consecutive slashes in `path` into a single slash.
///
/// The output never contains empty segments, and the presence of a leading or
/// trailing slash is controlled by the flags alone, independent of whatever
/// the input carried. Total over all string inputs.
pub fn normalize(path: &str, keep_leading_slash: bool, keep_trailing_slash: bool) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut normalized = String::with_capacity(path.len() + 2);
    if keep_leading_slash {
        normalized.push('/');
    }
    normalized.push_str(&segments.join("/"));
    if keep_trailing_slash && !normalized.ends_with('/') {
        normalized.push('/');
    }

    normalized
}

/// Remove the first occurrence of `prefix` from `path`.
///
/// The rest of the path is left untouched; a path without the prefix is
/// returned unchanged.
pub fn strip_prefix_once(path: &str, prefix: &str) -> String {
    path.replacen(prefix, "", 1)
}

/// Final non-empty segment of a slash-separated path, if any
pub fn final_segment(path: &str) -> Option<&str> {
    path.rsplit('/').find(|s| !s.is_empty())
}

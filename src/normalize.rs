//! Dot-segment removal (RFC 3986 §5.2.4).

use std::borrow::Cow;

use crate::constants::PATH_DELIMITER;

/// Removes `.` and `..` segments from `path`.
///
/// A `.` segment is dropped. A `..` segment removes the segment before it,
/// if any, and is otherwise dropped, so `..` never climbs above the root.
/// A leading `/` is preserved, and a path ending in `.` or `..` keeps a
/// trailing `/`.
///
/// # Examples
///
/// ```
/// use uri_components::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/foo/../bar"), "/bar");
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("/../x"), "/x");
/// assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> Cow<'_, str> {
    if !path.split(PATH_DELIMITER).any(|s| s == "." || s == "..") {
        return Cow::Borrowed(path);
    }

    let absolute = path.starts_with(PATH_DELIMITER);
    let relative = if absolute { &path[1..] } else { path };
    let segments: Vec<&str> = relative.split(PATH_DELIMITER).collect();
    let last = segments.len() - 1;

    let mut output: Vec<&str> = Vec::with_capacity(segments.len());
    let mut trailing_slash = false;
    for (i, segment) in segments.into_iter().enumerate() {
        match segment {
            "." => trailing_slash = i == last,
            ".." => {
                output.pop();
                trailing_slash = i == last;
            }
            s => output.push(s),
        }
    }

    let mut normalized = String::with_capacity(path.len());
    if absolute {
        normalized.push(PATH_DELIMITER);
    }
    normalized.push_str(&output.join("/"));
    if trailing_slash && !output.is_empty() {
        normalized.push(PATH_DELIMITER);
    }
    Cow::Owned(normalized)
}

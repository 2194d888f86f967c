//! Path addressing shared by every accessor.
//!
//! A path is a `/`-separated list of segments. Empty segments are dropped, so
//! `"a/b"`, `"/a/b"` and `"//a//b/"` all address the same node and `""` or `"/"`
//! address the accessor's current node. Segments starting with `@` name an XML
//! attribute of the current element.

/// Separator between path segments.
pub const PATH_DELIMITER: &str = "/";

/// Delimiter used to split delimited-string arrays when the caller has no
/// preference.
pub const DEFAULT_ARRAY_DELIMITER: &str = " ";

/// Prefix marking an attribute segment.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Splits a path into its non-empty segments.
///
/// # Example
///
/// ```
/// use confpath::split_path;
///
/// assert_eq!(split_path("/server//http/"), vec!["server", "http"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Joins path parts into a normalized absolute path.
///
/// Each part may itself contain delimiters; empty segments are dropped and the
/// result always starts with a single `/`.
///
/// # Example
///
/// ```
/// use confpath::join_path;
///
/// assert_eq!(join_path(["/first", "stringElement"]), "/first/stringElement");
/// assert_eq!(join_path(["", "/"]), "/");
/// ```
pub fn join_path<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for part in parts {
        for segment in split_path(part.as_ref()) {
            joined.push_str(PATH_DELIMITER);
            joined.push_str(segment);
        }
    }
    if joined.is_empty() {
        joined.push_str(PATH_DELIMITER);
    }
    joined
}

/// Returns the attribute name if the segment addresses an attribute.
pub fn attribute_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(ATTRIBUTE_PREFIX)
}

/// Returns `true` when the segment addresses an attribute.
pub fn is_attribute(segment: &str) -> bool {
    attribute_name(segment).is_some()
}

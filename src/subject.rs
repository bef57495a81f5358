//! Subject name derivation from uploaded file names.
//!
//! Purely cosmetic: the name only appears in titles and output file names.

use std::path::Path;

/// Name used when a file name has no alphabetic prefix
pub const PLACEHOLDER_SUBJECT: &str = "subject";

/// Leading run of ASCII letters and underscores in `file_name`, with trailing
/// underscores removed.
///
/// `"tanaka_trial01.csv"` gives `"tanaka"`. Names starting with anything else,
/// or whose prefix is only underscores, fall back to [`PLACEHOLDER_SUBJECT`].
/// An underscore-only prefix such as `"__1.csv"` maps to the placeholder, never
/// to an empty name.
pub fn subject_name(file_name: &str) -> String {
    let prefix: String = file_name
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect();
    let trimmed = prefix.trim_end_matches('_');

    if trimmed.is_empty() {
        PLACEHOLDER_SUBJECT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Subject name from the first path's file name
pub fn subject_from_paths<P: AsRef<Path>>(paths: &[P]) -> String {
    paths
        .first()
        .and_then(|p| p.as_ref().file_name())
        .map(|name| subject_name(&name.to_string_lossy()))
        .unwrap_or_else(|| PLACEHOLDER_SUBJECT.to_string())
}

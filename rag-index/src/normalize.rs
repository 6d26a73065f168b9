//! Whitespace normalization applied once per document before chunking.

/// Collapse a raw extracted document into a single clean line of text.
///
/// - Carriage returns become spaces.
/// - Every maximal run of whitespace (spaces, tabs, newlines, form feeds)
///   collapses into one space.
/// - Leading and trailing whitespace is removed.
///
/// Pure function with no failure modes.
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for ch in s.chars() {
        // '\r' is whitespace, so the replacement folds into the run logic.
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }

    out
}

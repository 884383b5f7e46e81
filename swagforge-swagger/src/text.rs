//! Small string helpers.

/// Interpret `raw` as a quoted string literal: `"a\tb"` or `` `raw` ``.
/// Anything else yields `None`.
pub fn unquote(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
        return Some(raw[1..raw.len() - 1].to_string());
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return serde_json::from_str(raw).ok();
    }
    None
}

/// Unquote, or an empty string when `raw` is not a literal.
pub fn unquote_or_empty(raw: &str) -> String {
    unquote(raw).unwrap_or_default()
}

//! `@respdoc-<code>(...)` doc-comment overrides.
//!
//! ```text
//! // @respdoc-400 (ErrorResponse) // bad request
//! // @respdoc-401 (code: 401
//! //               msg: unauthorized) // token expired
//! ```
//!
//! Content made of `key: value` lines becomes an example, anything else is
//! taken as a type name.

use crate::spec::{Response, Schema};
use std::collections::BTreeMap;

const MARKER: &str = "@respdoc-";

/// Parse one doc line. Returns the status code and its response, or `None`
/// when the line carries no well-formed marker.
pub fn parse_respdoc(line: &str) -> Option<(String, Response)> {
    let start = line.find(MARKER)?;
    let rest = &line[start + MARKER.len()..];
    let open = rest.find('(')?;
    let close = open + rest[open..].find(')')?;

    let code = rest[..open].trim();
    if code.is_empty() {
        return None;
    }

    let description = rest[close + 1..]
        .find("//")
        .map(|at| {
            rest[close + 1 + at + 2..]
                .trim_matches(|c: char| c == '*' || c == '/' || c.is_whitespace())
                .to_string()
        })
        .unwrap_or_default();

    let content = rest[open + 1..close].trim();
    let mut schema = Schema::default();
    if content.contains(':') {
        let example = example_object(content);
        schema.example = serde_json::to_string(&example).ok().map(Into::into);
    } else if !content.is_empty() {
        schema = Schema::reference(content);
    }

    Some((code.to_string(), Response { description, schema }))
}

/// `key: value` lines, keyed in sorted order. Lines without a colon and
/// leading comment markers are ignored.
fn example_object(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim().trim_start_matches('/').trim();
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Every override found in `docs`, later lines winning for the same code.
pub fn parse_respdocs(docs: &[String]) -> BTreeMap<String, Response> {
    docs.iter().filter_map(|line| parse_respdoc(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_override() {
        let (code, response) = parse_respdoc("// @respdoc-400 (ErrorResponse) // bad request").unwrap();
        assert_eq!(code, "400");
        assert_eq!(response.description, "bad request");
        assert_eq!(response.schema, Schema::reference("ErrorResponse"));
    }

    #[test]
    fn test_example_override() {
        let (code, response) =
            parse_respdoc("@respdoc-401 (msg: unauthorized\ncode: 401) /* token expired */").unwrap();
        assert_eq!(code, "401");
        assert_eq!(response.description, "");
        assert_eq!(
            response.schema.example,
            Some(json!(r#"{"code":"401","msg":"unauthorized"}"#))
        );
        assert!(response.schema.reference.is_none());
    }

    #[test]
    fn test_comment_markers_trimmed() {
        let (_, response) = parse_respdoc("@respdoc-500 (Fault) // server error */").unwrap();
        assert_eq!(response.description, "server error");
    }

    #[test]
    fn test_malformed_lines_skipped() {
        assert!(parse_respdoc("// just a comment").is_none());
        assert!(parse_respdoc("@respdoc-400 ErrorResponse").is_none());
        assert!(parse_respdoc("@respdoc-400 (ErrorResponse").is_none());
        assert!(parse_respdoc("@respdoc- (ErrorResponse)").is_none());
    }

    #[test]
    fn test_empty_content() {
        let (_, response) = parse_respdoc("@respdoc-204 () // no content").unwrap();
        assert_eq!(response.schema, Schema::default());
        assert_eq!(response.description, "no content");
    }

    #[test]
    fn test_collect_all() {
        let docs = vec![
            "get a user".to_string(),
            "@respdoc-404 (NotFound) // missing".to_string(),
            "@respdoc-400 (BadRequest)".to_string(),
        ];
        let responses = parse_respdocs(&docs);
        assert_eq!(responses.keys().collect::<Vec<_>>(), vec!["400", "404"]);
    }
}

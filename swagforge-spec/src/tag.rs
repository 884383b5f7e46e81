//! Struct field tags.
//!
//! Members carry their annotations as a raw struct-tag string such as
//! `` `json:"name,optional" validate:"min=1"` ``. Each `key:"value"` pair
//! becomes a [`Tag`] whose value is split on commas into a primary name and
//! trailing options.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Field comes from an HTTP header.
pub const TAG_HEADER: &str = "header";
/// Field comes from a URL path segment.
pub const TAG_PATH: &str = "path";
/// Field comes from the query string or a form body.
pub const TAG_FORM: &str = "form";
/// Field comes from the JSON body.
pub const TAG_JSON: &str = "json";
/// Validation constraints.
pub const TAG_VALIDATE: &str = "validate";
/// Example value.
pub const TAG_EXAMPLE: &str = "example";

/// Tag keys that decide where a field is read from, in lookup order.
pub const LOCATION_TAGS: [&str; 4] = [TAG_PATH, TAG_HEADER, TAG_FORM, TAG_JSON];

static TAG_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z0-9_\-]+):"((?:[^"\\]|\\.)*)""#).expect("tag pattern is valid")
});

/// A single parsed `key:"name,opt1,opt2"` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Whether this tag decides the location of its field.
    pub fn is_location(&self) -> bool {
        LOCATION_TAGS.contains(&self.key.as_str())
    }

    /// Whether any option marks the field as not required.
    pub fn is_optional(&self) -> bool {
        self.options
            .iter()
            .any(|option| option.starts_with("optional") || option.starts_with("omitempty"))
    }
}

/// Parse a raw struct-tag string into its tags, in declaration order.
///
/// Surrounding backticks are ignored. Text that does not form a
/// `key:"value"` pair is skipped.
pub fn parse_tags(raw: &str) -> Vec<Tag> {
    let raw = raw.trim().trim_matches('`');

    TAG_PAIR
        .captures_iter(raw)
        .map(|caps| {
            let key = caps[1].to_string();
            let value = caps[2].replace("\\\"", "\"");
            let mut parts = value.split(',').map(str::to_string);
            let name = parts.next().unwrap_or_default();
            Tag {
                key,
                name,
                options: parts.collect(),
            }
        })
        .collect()
}

//! Interpretation of field tags as schema constraints.
//!
//! `validate` and `example` tags, together with the options of a location
//! tag (`default=`, `options=`, `range=`, `example=`, `optional`,
//! `omitempty`), are applied to a [`Schema`]. Values that cannot be parsed
//! are skipped.

use crate::spec::Schema;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use swagforge_spec::{TAG_EXAMPLE, TAG_VALIDATE, Tag};

const OPTION_DEFAULT: &str = "default=";
const OPTION_OPTIONS: &str = "options=";
const OPTION_RANGE: &str = "range=";
const OPTION_EXAMPLE: &str = "example=";
const OPTIONS_SEPARATOR: char = '|';

static RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([+-]?\d+(\.\d+)?):([+-]?\d+(\.\d+)?)\]").expect("range pattern is valid")
});

/// Parse `[min:max]`. A reversed range collapses to `(min, min)`.
pub fn parse_range_option(option: &str) -> Option<(f64, f64)> {
    let caps = RANGE.captures(option)?;
    let min: f64 = caps[1].parse().ok()?;
    let max: f64 = caps[3].parse().ok()?;
    if max < min {
        Some((min, min))
    } else {
        Some((min, max))
    }
}

/// Apply every option of a `validate` tag.
pub fn fill_validate(schema: &mut Schema, tag: &Tag) {
    if tag.key != TAG_VALIDATE {
        return;
    }
    fill_validate_option(schema, &tag.name);
    for option in &tag.options {
        fill_validate_option(schema, option);
    }
}

/// Apply one `validate` option such as `min=1` or `oneof=a b`.
///
/// Bounds depend on the schema type: numbers get `minimum`/`maximum`,
/// strings get lengths and arrays get item counts.
pub fn fill_validate_option(schema: &mut Schema, option: &str) {
    let Some((key, value)) = option.split_once('=') else {
        return;
    };
    let schema_type = schema.type_name().to_string();

    match key {
        "oneof" => schema.enum_values = one_of(value),
        "min" | "gte" | "gt" => {
            match schema_type.as_str() {
                "number" | "integer" => {
                    if let Ok(v) = value.parse() {
                        schema.bounds.minimum = Some(v);
                    }
                }
                "array" => schema.bounds.min_items = value.parse().ok(),
                "string" => schema.bounds.min_length = value.parse().ok(),
                _ => {}
            }
            if key == "gt" {
                schema.bounds.exclusive_minimum = true;
            }
        }
        "max" | "lte" | "lt" => {
            match schema_type.as_str() {
                "number" | "integer" => {
                    if let Ok(v) = value.parse() {
                        schema.bounds.maximum = Some(v);
                    }
                }
                "array" => schema.bounds.max_items = value.parse().ok(),
                "string" => schema.bounds.max_length = value.parse().ok(),
                _ => {}
            }
            if key == "lt" {
                schema.bounds.exclusive_maximum = true;
            }
        }
        _ => {}
    }
}

/// `'red green' 'blue'` splits on the quotes, `red green blue` on spaces.
fn one_of(value: &str) -> Vec<String> {
    if value.contains('\'') {
        value
            .trim_start_matches('\'')
            .trim_end_matches('\'')
            .split("' '")
            .map(str::to_string)
            .collect()
    } else {
        value.split(' ').map(str::to_string).collect()
    }
}

/// Apply an `example` tag, coerced to the schema type.
pub fn fill_example(schema: &mut Schema, tag: &Tag) {
    if tag.key != TAG_EXAMPLE {
        return;
    }

    let example = match schema.type_name() {
        "array" => {
            let values = std::iter::once(&tag.name).chain(&tag.options);
            Some(Value::from(values.cloned().collect::<Vec<_>>()))
        }
        _ => coerce(schema.type_name(), &tag.name),
    };
    if example.is_some() {
        schema.example = example;
    }
}

fn coerce(schema_type: &str, raw: &str) -> Option<Value> {
    match schema_type {
        "string" => Some(Value::from(raw)),
        "integer" => raw.trim().parse::<i64>().ok().map(Value::from),
        "number" => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        "boolean" => parse_bool(raw).map(Value::from),
        _ => None,
    }
}

/// Boolean literals: `1 t T TRUE true True` and their false forms.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Apply the options of a location tag (`default=`, `options=`, `range=`,
/// `example=`). Defaults are typed like examples and stay strings when
/// they do not parse.
pub fn fill_field_options(schema: &mut Schema, tag: &Tag) {
    for option in &tag.options {
        if let Some(value) = option.strip_prefix(OPTION_DEFAULT) {
            let typed = coerce(schema.type_name(), value);
            schema.default = Some(typed.unwrap_or_else(|| Value::from(value)));
        } else if let Some(value) = option.strip_prefix(OPTION_OPTIONS) {
            schema.enum_values = value.split(OPTIONS_SEPARATOR).map(str::to_string).collect();
        } else if let Some(value) = option.strip_prefix(OPTION_RANGE) {
            if let Some((min, max)) = parse_range_option(value) {
                schema.bounds.minimum = Some(min);
                schema.bounds.maximum = Some(max);
            }
        } else if let Some(value) = option.strip_prefix(OPTION_EXAMPLE) {
            schema.example = Some(Value::from(value));
        }
    }
}

/// A location tag marks its field required unless an option says
/// `optional` or `omitempty`.
pub fn is_required(tag: &Tag) -> bool {
    !tag.is_optional()
}

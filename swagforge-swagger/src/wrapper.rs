//! Outer response wrapper (the `pack` definition).
//!
//! Every successful response can be wrapped in an envelope such as
//! `{"code": 0, "msg": "ok", "data": ...}`. The envelope layout is either
//! the built-in default or a JSON array of field descriptors; exactly one
//! field carries the route's own response.

use crate::error::{Result, SwaggerError};
use crate::spec::{Properties, Schema};
use serde::Deserialize;
use serde_json::Value;

/// The built-in wrapper layout, in descriptor form.
pub const DEFAULT_RESPONSE_JSON: &str = r#"[
  {"name": "trace_id", "type": "string", "description": "trace id", "example": "a1b2c3d4e5f6g7h8"},
  {"name": "code", "type": "integer", "description": "status code", "example": 0},
  {"name": "msg", "type": "string", "description": "message", "example": "ok"},
  {"name": "data", "type": "object", "description": "data", "is_data": true}
]"#;

/// One wrapper field descriptor.
#[derive(Debug, Clone, Deserialize)]
struct WrapperField {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    field_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    example: Option<Value>,
    #[serde(default)]
    is_data: bool,
}

/// Wrapper schema plus the name of the field holding the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseWrapper {
    pub schema: Schema,
    pub data_key: String,
}

/// Parse a wrapper layout.
///
/// Field types are used verbatim as schema types. When several fields are
/// marked `is_data` the last one wins.
pub fn parse_response(json: &str) -> Result<ResponseWrapper> {
    let fields: Vec<WrapperField> = serde_json::from_str(json)
        .map_err(|e| SwaggerError::MalformedWrapper(e.to_string()))?;

    let mut properties = Properties::new();
    let mut data_key = None;

    for (index, field) in fields.into_iter().enumerate() {
        if field.name.is_empty() || field.field_type.is_empty() {
            return Err(SwaggerError::MalformedWrapper(format!(
                "field {} needs both a name and a type",
                index
            )));
        }
        if field.is_data {
            data_key = Some(field.name.clone());
        }
        properties.insert(
            field.name,
            Schema {
                description: field.description,
                example: field.example,
                ..Schema::typed(field.field_type)
            },
        );
    }

    let data_key = data_key.ok_or_else(|| {
        SwaggerError::MalformedWrapper("no field is marked is_data".to_string())
    })?;

    Ok(ResponseWrapper {
        schema: Schema::object(properties),
        data_key,
    })
}

/// The built-in wrapper: `trace_id`, `code`, `msg` and `data`.
pub fn default_wrapper() -> ResponseWrapper {
    let field = |schema_type: &str, description: &str, example: Option<Value>| Schema {
        description: description.to_string(),
        example,
        ..Schema::typed(schema_type)
    };

    let mut properties = Properties::new();
    properties.insert(
        "trace_id".to_string(),
        field("string", "trace id", Some(Value::from("a1b2c3d4e5f6g7h8"))),
    );
    properties.insert(
        "code".to_string(),
        field("integer", "status code", Some(Value::from(0))),
    );
    properties.insert(
        "msg".to_string(),
        field("string", "message", Some(Value::from("ok"))),
    );
    properties.insert("data".to_string(), field("object", "data", None));

    ResponseWrapper {
        schema: Schema::object(properties),
        data_key: "data".to_string(),
    }
}

//! Swagger 2.0 document types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix of every schema reference.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Swagger 2.0 document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub host: String,
    #[serde(rename = "basePath", skip_serializing_if = "String::is_empty", default)]
    pub base_path: String,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    /// Keyed by URL template, in route declaration order.
    pub paths: IndexMap<String, PathItem>,
    pub definitions: BTreeMap<String, Schema>,
    #[serde(rename = "securityDefinitions")]
    pub security_definitions: BTreeMap<String, SecurityScheme>,
}

/// API information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub version: String,
}

/// Operations of one URL template
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Slot for an upper-case HTTP method, `None` for methods a path item
    /// cannot carry.
    pub fn slot_mut(&mut self, method: &str) -> Option<&mut Option<Operation>> {
        match method {
            "GET" => Some(&mut self.get),
            "DELETE" => Some(&mut self.delete),
            "POST" => Some(&mut self.post),
            "PUT" => Some(&mut self.put),
            "PATCH" => Some(&mut self.patch),
            _ => None,
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        [&self.get, &self.delete, &self.post, &self.put, &self.patch]
            .into_iter()
            .flatten()
    }
}

/// Operation (endpoint)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Operation {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(rename = "operationId", skip_serializing_if = "String::is_empty", default)]
    pub operation_id: String,
    pub responses: BTreeMap<String, Response>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Header,
    Path,
    Query,
    FormData,
    Body,
}

/// Parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty", default)]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(flatten)]
    pub bounds: Bounds,
    /// Only set for `body` parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<Schema>>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            location,
            required: false,
            param_type: None,
            format: None,
            enum_values: Vec::new(),
            default: None,
            example: None,
            bounds: Bounds::default(),
            schema: None,
        }
    }

    /// Copy validation constraints, enum, default and example from a schema.
    pub fn copy_constraints(&mut self, schema: &Schema) {
        self.bounds = schema.bounds.clone();
        if !schema.enum_values.is_empty() {
            self.enum_values = schema.enum_values.clone();
        }
        if schema.default.is_some() {
            self.default = schema.default.clone();
        }
        if schema.example.is_some() {
            self.example = schema.example.clone();
        }
    }
}

/// Numeric, length and item-count constraints shared by parameters and
/// schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "number", default)]
    pub maximum: Option<f64>,
    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "is_false", default)]
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "number", default)]
    pub minimum: Option<f64>,
    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "is_false", default)]
    pub exclusive_minimum: bool,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Whole-valued bounds are written as integers (`1`, not `1.0`).
fn number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    pub schema: Schema,
}

/// Ordered object properties.
pub type Properties = IndexMap<String, Schema>;

/// Schema object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(flatten)]
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty", default)]
    pub enum_values: Vec<String>,
    #[serde(rename = "allOf", skip_serializing_if = "Vec::is_empty", default)]
    pub all_of: Vec<Schema>,
}

impl Schema {
    /// `{"type": <schema_type>}`
    pub fn typed(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Default::default()
        }
    }

    /// `{"$ref": "#/definitions/<name>"}`
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", DEFINITIONS_PREFIX, name)),
            ..Default::default()
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// An object schema with the given properties.
    pub fn object(properties: Properties) -> Self {
        Self {
            schema_type: Some("object".to_string()),
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn type_name(&self) -> &str {
        self.schema_type.as_deref().unwrap_or("")
    }

    /// Visit this schema and every nested schema.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Schema)) {
        visit(self);
        if let Some(items) = &self.items {
            items.walk(visit);
        }
        if let Some(extra) = &self.additional_properties {
            extra.walk(visit);
        }
        for property in self.properties.iter().flat_map(|p| p.values()) {
            property.walk(visit);
        }
        for part in &self.all_of {
            part.walk(visit);
        }
    }
}

/// Security scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
}

/// Security requirement
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

impl SwaggerDocument {
    /// Every `$ref` value in paths and definitions, in document order.
    pub fn references<'a>(&'a self) -> Vec<&'a str> {
        let mut refs: Vec<&'a str> = Vec::new();
        let mut collect = |schema: &'a Schema| {
            if let Some(reference) = schema.reference.as_deref() {
                refs.push(reference);
            }
        };

        for item in self.paths.values() {
            for operation in item.operations() {
                for parameter in &operation.parameters {
                    if let Some(schema) = &parameter.schema {
                        schema.walk(&mut collect);
                    }
                }
                for response in operation.responses.values() {
                    response.schema.walk(&mut collect);
                }
            }
        }
        for schema in self.definitions.values() {
            schema.walk(&mut collect);
        }
        refs
    }
}

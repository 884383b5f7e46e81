//! Mapping from API-definition types to Swagger `type`/`format` pairs.

use crate::spec::Schema;
use swagforge_spec::Type;

/// Builtin scalar types of the API language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Int,
    Uint,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int64,
    Uint64,
    Bool,
    String,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// Look up a builtin by name. A leading `*` is ignored.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name.trim_start_matches('*') {
            "int" | "int32" | "rune" => PrimitiveKind::Int,
            "uint" | "uint32" => PrimitiveKind::Uint,
            "int8" => PrimitiveKind::Int8,
            "uint8" | "byte" => PrimitiveKind::Uint8,
            "int16" => PrimitiveKind::Int16,
            "uint16" => PrimitiveKind::Uint16,
            "int64" => PrimitiveKind::Int64,
            "uint64" => PrimitiveKind::Uint64,
            "bool" => PrimitiveKind::Bool,
            "string" => PrimitiveKind::String,
            "float32" => PrimitiveKind::Float32,
            "float64" => PrimitiveKind::Float64,
            _ => return None,
        };
        Some(kind)
    }

    /// Swagger `type` and `format`.
    pub fn type_format(self) -> (&'static str, Option<&'static str>) {
        match self {
            PrimitiveKind::Int => ("integer", Some("int32")),
            PrimitiveKind::Uint => ("integer", Some("uint32")),
            PrimitiveKind::Int8 => ("integer", Some("int8")),
            PrimitiveKind::Uint8 => ("integer", Some("uint8")),
            PrimitiveKind::Int16 => ("integer", Some("int16")),
            PrimitiveKind::Uint16 => ("integer", Some("uint16")),
            PrimitiveKind::Int64 => ("integer", Some("int64")),
            PrimitiveKind::Uint64 => ("integer", Some("uint64")),
            PrimitiveKind::Bool => ("boolean", Some("boolean")),
            PrimitiveKind::String => ("string", None),
            PrimitiveKind::Float32 => ("number", Some("float")),
            PrimitiveKind::Float64 => ("number", Some("double")),
        }
    }

    pub fn schema(self) -> Schema {
        let (schema_type, format) = self.type_format();
        Schema {
            schema_type: Some(schema_type.to_string()),
            format: format.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Schema for a field or response type.
///
/// Structs become references, arrays wrap their element schema, maps and
/// `interface{}` become open objects and pointers are transparent.
pub fn schema_for_type(ty: &Type) -> Schema {
    match ty {
        Type::Primitive { name } => match PrimitiveKind::from_type_name(name) {
            Some(kind) => kind.schema(),
            None => {
                swagforge_log::debug!("no mapping for builtin `{}`, using object", name);
                Schema::typed("object")
            }
        },
        Type::Struct(def) => Schema::reference(&def.name),
        Type::Pointer { inner } => schema_for_type(inner),
        Type::Array { value } => Schema::array(schema_for_type(value)),
        Type::Map { value, .. } => Schema {
            additional_properties: Some(Box::new(schema_for_type(value))),
            ..Schema::typed("object")
        },
        Type::Interface => Schema::typed("object"),
    }
}

/// `type`/`format` of a non-body parameter.
///
/// Array and pointer markers are removed first, so `[]int64` maps like
/// `int64`. Anything that is not a builtin is sent as a string.
pub fn parameter_type(ty: &Type) -> (String, Option<String>) {
    let mut inner = ty;
    while let Type::Array { value } | Type::Pointer { inner: value } = inner {
        inner = &**value;
    }

    match inner {
        Type::Primitive { name } => match PrimitiveKind::from_type_name(name) {
            Some(kind) => {
                let (schema_type, format) = kind.type_format();
                (schema_type.to_string(), format.map(str::to_string))
            }
            None => ("string".to_string(), None),
        },
        _ => ("string".to_string(), None),
    }
}

//! API definition types

use crate::tag::{LOCATION_TAGS, Tag, parse_tags};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fully parsed API definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    #[serde(default)]
    pub info: Info,
    /// Every declared type, in declaration order.
    #[serde(default)]
    pub types: Vec<Type>,
    pub service: Service,
}

/// The `info (...)` block. Values are kept as written, quotes included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Info {
    pub fn property(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }
}

/// A service and its route groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }
}

/// Key/value annotations attached to a group or route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Routes sharing a prefix, middleware and grouping annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub annotation: Annotation,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotation value for `key`, or an empty string.
    pub fn annotation(&self, key: &str) -> &str {
        self.annotation
            .properties
            .get(key)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotation.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }
}

/// The `@doc(...)` block of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtDoc {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
}

/// One HTTP route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub request_type: Option<Type>,
    #[serde(default)]
    pub response_type: Option<Type>,
    #[serde(default)]
    pub handler: String,
    /// Raw doc-comment lines preceding the route.
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub at_doc: AtDoc,
}

impl Route {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = handler.into();
        self
    }

    pub fn with_request(mut self, ty: Type) -> Self {
        self.request_type = Some(ty);
        self
    }

    pub fn with_response(mut self, ty: Type) -> Self {
        self.response_type = Some(ty);
        self
    }

    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }

    pub fn with_at_doc(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.at_doc.properties.insert(key.into(), value.into());
        self
    }

    /// `@doc` property for `key`, or an empty string.
    pub fn at_doc_property(&self, key: &str) -> &str {
        self.at_doc
            .properties
            .get(key)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Route documentation flattened into one line: the `@doc` text, its
    /// `summary` property and then the doc-comment lines.
    pub fn joined_doc(&self) -> String {
        let mut doc = self.at_doc.text.clone();
        doc.push_str(self.at_doc_property("summary"));
        doc.push_str(&self.docs.join(" "));
        doc.trim().to_string()
    }
}

/// A named struct declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefineStruct {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    /// Comment lines written above the declaration.
    #[serde(default)]
    pub docs: Vec<String>,
}

impl DefineStruct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }
}

/// A declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// A builtin such as `string`, `int64` or `bool`.
    Primitive { name: String },
    /// A struct, either declared inline or referenced by name.
    Struct(DefineStruct),
    Pointer { inner: Box<Type> },
    Array { value: Box<Type> },
    Map { key: String, value: Box<Type> },
    Interface,
}

impl Type {
    pub fn primitive(name: impl Into<String>) -> Self {
        Type::Primitive { name: name.into() }
    }

    pub fn pointer(inner: Type) -> Self {
        Type::Pointer {
            inner: Box::new(inner),
        }
    }

    pub fn array(value: Type) -> Self {
        Type::Array {
            value: Box::new(value),
        }
    }

    pub fn map(key: impl Into<String>, value: Type) -> Self {
        Type::Map {
            key: key.into(),
            value: Box::new(value),
        }
    }

    /// A struct referenced only by name, without its members.
    pub fn named(name: impl Into<String>) -> Self {
        Type::Struct(DefineStruct::new(name))
    }

    /// Source-level spelling of the type: `int64`, `*User`, `[]User`,
    /// `map[string]User`, `interface{}`.
    pub fn name(&self) -> String {
        match self {
            Type::Primitive { name } => name.clone(),
            Type::Struct(def) => def.name.clone(),
            Type::Pointer { inner } => format!("*{}", inner.name()),
            Type::Array { value } => format!("[]{}", value.name()),
            Type::Map { key, value } => format!("map[{}]{}", key, value.name()),
            Type::Interface => "interface{}".to_string(),
        }
    }

    pub fn as_struct(&self) -> Option<&DefineStruct> {
        match self {
            Type::Struct(def) => Some(def),
            _ => None,
        }
    }

    /// Comment lines of a struct type, empty for everything else.
    pub fn documents(&self) -> &[String] {
        match self {
            Type::Struct(def) => &def.docs,
            _ => &[],
        }
    }
}

/// A field of a struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    /// Raw struct-tag string.
    #[serde(default)]
    pub tag: String,
    /// Trailing comment, `//` markers included.
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub docs: Vec<String>,
    /// Set for embedded (anonymous) fields.
    #[serde(default)]
    pub is_inline: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            comment: String::new(),
            docs: Vec::new(),
            is_inline: false,
        }
    }

    /// An embedded field of the given struct type.
    pub fn embedded(def: DefineStruct) -> Self {
        Self {
            is_inline: true,
            ..Self::new("", Type::Struct(def))
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn tags(&self) -> Vec<Tag> {
        parse_tags(&self.tag)
    }

    /// Whether this field is an anonymous struct whose members belong to
    /// the enclosing struct.
    pub fn is_embedded(&self) -> bool {
        (self.is_inline || self.name.is_empty()) && matches!(self.ty, Type::Struct(_))
    }

    /// Key of the first location tag (`path`, `header`, `form`, `json`).
    pub fn location_key(&self) -> Option<String> {
        self.tags()
            .into_iter()
            .find(|tag| LOCATION_TAGS.contains(&tag.key.as_str()))
            .map(|tag| tag.key)
    }

    /// Name given by the first location tag.
    pub fn property_name(&self) -> Option<String> {
        self.tags()
            .into_iter()
            .find(Tag::is_location)
            .map(|tag| tag.name)
    }

    /// Comment text, preferring the trailing comment over doc lines.
    pub fn comment_text(&self) -> String {
        if !self.comment.is_empty() {
            self.comment.clone()
        } else {
            self.docs.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Type::primitive("int64").name(), "int64");
        assert_eq!(Type::pointer(Type::named("User")).name(), "*User");
        assert_eq!(Type::array(Type::pointer(Type::named("User"))).name(), "[]*User");
        assert_eq!(Type::map("string", Type::primitive("string")).name(), "map[string]string");
        assert_eq!(Type::Interface.name(), "interface{}");
    }

    #[test]
    fn test_group_annotation_default() {
        let group = Group::new().with_annotation("prefix", "/api");
        assert_eq!(group.annotation("prefix"), "/api");
        assert_eq!(group.annotation("jwt"), "");
    }

    #[test]
    fn test_joined_doc() {
        let mut route = Route::new("get", "/ping").with_doc("first").with_doc("second");
        route.at_doc.text = "intro ".to_string();
        assert_eq!(route.joined_doc(), "intro first second");
    }

    #[test]
    fn test_member_location_and_property_name() {
        let member = Member::new("Id", Type::primitive("int64"))
            .with_tag(r#"validate:"min=1" path:"id""#);
        assert_eq!(member.location_key().as_deref(), Some("path"));
        assert_eq!(member.property_name().as_deref(), Some("id"));

        let untagged = Member::new("Name", Type::primitive("string"));
        assert_eq!(untagged.location_key(), None);
        assert_eq!(untagged.property_name(), None);
    }

    #[test]
    fn test_embedded_detection() {
        assert!(Member::embedded(DefineStruct::new("Base")).is_embedded());
        assert!(!Member::new("User", Type::named("User")).is_embedded());
        assert!(!Member::new("", Type::primitive("string")).is_embedded());
    }

    #[test]
    fn test_type_deserialize() {
        let ty: Type = serde_json::from_str(
            r#"{"kind":"array","value":{"kind":"pointer","inner":{"kind":"struct","name":"User"}}}"#,
        )
        .unwrap();
        assert_eq!(ty.name(), "[]*User");
    }
}

//! Rendering of declared structs as `definitions` entries.

use crate::member::schema_of_field;
use crate::spec::{Properties, Schema};
use crate::tags::is_required;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use swagforge_spec::{Member, TAG_FORM, TAG_HEADER, TAG_JSON, TAG_PATH, Type};

/// Properties of one struct, split by the tag that named them.
#[derive(Debug, Default)]
struct Collected {
    json: Properties,
    form: Properties,
    untagged: Properties,
    required: Vec<String>,
    /// Names of member-less structs whose properties are merged later.
    inlines: Vec<String>,
}

impl Collected {
    fn require(&mut self, name: &str) {
        if name != "required" && !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
    }
}

/// Add one object schema per declared struct to `definitions`.
///
/// Properties of embedded structs are flattened into their host. An
/// embedded struct given only by name is resolved after every struct has
/// been rendered, with its properties placed ahead of the host's own.
pub fn render_definitions(definitions: &mut BTreeMap<String, Schema>, types: &[Type]) {
    let mut inline_map: IndexMap<String, Vec<String>> = IndexMap::new();

    for ty in types {
        let Type::Struct(def) = ty else {
            swagforge_log::debug!("skipping non-struct type `{}`", ty.name());
            continue;
        };

        let collected = collect_properties(&def.members);

        let mut properties = if collected.json.is_empty() && !collected.form.is_empty() {
            collected.form
        } else {
            collected.json
        };
        properties.extend(collected.untagged);

        let required = collected
            .required
            .into_iter()
            .filter(|name| properties.contains_key(name))
            .collect();

        if !collected.inlines.is_empty() {
            inline_map
                .entry(def.name.clone())
                .or_default()
                .extend(collected.inlines);
        }

        definitions.insert(
            def.name.clone(),
            Schema {
                title: def.name.clone(),
                required,
                ..Schema::object(properties)
            },
        );
    }

    resolve_inlines(definitions, &inline_map);
}

/// Walk members, descending into embedded structs.
fn collect_properties(members: &[Member]) -> Collected {
    let mut collected = Collected::default();
    let mut stack: Vec<&Member> = members.iter().rev().collect();

    while let Some(member) = stack.pop() {
        let location = member.location_key();
        if matches!(location.as_deref(), Some(TAG_HEADER | TAG_PATH)) {
            continue;
        }

        let name = member.property_name().filter(|name| !name.is_empty());
        if member.is_embedded() && name.is_none() {
            if let Some(def) = member.ty.as_struct() {
                if def.members.is_empty() {
                    collected.inlines.push(def.name.clone());
                } else {
                    stack.extend(def.members.iter().rev());
                }
            }
            continue;
        }

        let name = name.unwrap_or_else(|| member.name.clone());
        if name.is_empty() {
            continue;
        }

        for tag in member.tags() {
            if (tag.key == TAG_JSON || tag.key == TAG_FORM) && is_required(&tag) {
                collected.require(&tag.name);
            }
        }

        let schema = schema_of_field(member);
        let bucket = match location.as_deref() {
            Some(TAG_JSON) => &mut collected.json,
            Some(TAG_FORM) => &mut collected.form,
            _ => &mut collected.untagged,
        };
        bucket.insert(name, schema);
    }

    collected
}

fn resolve_inlines(
    definitions: &mut BTreeMap<String, Schema>,
    inline_map: &IndexMap<String, Vec<String>>,
) {
    for (host, targets) in inline_map {
        let mut merged = Properties::new();
        for target in targets {
            match definitions.get(target).and_then(|d| d.properties.as_ref()) {
                Some(properties) => {
                    merged.extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())))
                }
                None => swagforge_log::warn!("`{}` embeds unknown type `{}`", host, target),
            }
        }

        if let Some(schema) = definitions.get_mut(host) {
            let own = schema.properties.take().unwrap_or_default();
            merged.extend(own);
            schema.properties = Some(merged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swagforge_spec::DefineStruct;

    fn field(name: &str, ty: &str, tag: &str) -> Member {
        Member::new(name, Type::primitive(ty)).with_tag(tag)
    }

    fn render(types: Vec<Type>) -> BTreeMap<String, Schema> {
        let mut definitions = BTreeMap::new();
        render_definitions(&mut definitions, &types);
        definitions
    }

    fn keys(schema: &Schema) -> Vec<&str> {
        schema
            .properties
            .as_ref()
            .map(|p| p.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_json_struct() {
        let user = DefineStruct::new("User")
            .with_member(field("Id", "int64", r#"json:"id""#))
            .with_member(field("Name", "string", r#"json:"name,optional""#))
            .with_member(field("Token", "string", r#"header:"Authorization""#));
        let definitions = render(vec![Type::Struct(user)]);

        let value = serde_json::to_value(&definitions["User"]).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "title": "User",
                "properties": {
                    "id": {"type": "integer", "format": "int64"},
                    "name": {"type": "string"}
                },
                "required": ["id"]
            })
        );
    }

    #[test]
    fn test_optional_only_struct_has_no_required() {
        let filter = DefineStruct::new("Filter")
            .with_member(field("Keyword", "string", r#"json:"keyword,optional""#))
            .with_member(field("Page", "int", r#"json:"page,omitempty""#));
        let definitions = render(vec![Type::Struct(filter)]);
        assert!(definitions["Filter"].required.is_empty());
    }

    #[test]
    fn test_form_properties_used_without_json() {
        let search = DefineStruct::new("SearchReq")
            .with_member(field("Query", "string", r#"form:"q""#))
            .with_member(field("Extra", "string", ""));
        let definitions = render(vec![Type::Struct(search)]);

        assert_eq!(keys(&definitions["SearchReq"]), vec!["q", "Extra"]);
        assert_eq!(definitions["SearchReq"].required, vec!["q"]);
    }

    #[test]
    fn test_form_properties_hidden_by_json() {
        let mixed = DefineStruct::new("Mixed")
            .with_member(field("A", "string", r#"form:"a""#))
            .with_member(field("B", "string", r#"json:"b""#));
        let definitions = render(vec![Type::Struct(mixed)]);

        assert_eq!(keys(&definitions["Mixed"]), vec!["b"]);
        assert_eq!(definitions["Mixed"].required, vec!["b"]);
    }

    #[test]
    fn test_embedded_members_flatten() {
        let base = DefineStruct::new("Base")
            .with_member(field("CreatedAt", "int64", r#"json:"created_at""#));
        let order = DefineStruct::new("Order")
            .with_member(field("Id", "int64", r#"json:"id""#))
            .with_member(Member::embedded(base.clone()));
        let definitions = render(vec![Type::Struct(base), Type::Struct(order)]);

        assert_eq!(keys(&definitions["Order"]), vec!["id", "created_at"]);
        assert_eq!(definitions["Order"].required, vec!["id", "created_at"]);
    }

    #[test]
    fn test_inline_reference_resolved_in_second_pass() {
        let audit = DefineStruct::new("Audit")
            .with_member(field("Editor", "string", r#"json:"editor""#));
        let page = DefineStruct::new("Page")
            .with_member(field("Title", "string", r#"json:"title""#))
            .with_member(Member::embedded(DefineStruct::new("Audit")));

        // Host declared before its inline target.
        let definitions = render(vec![Type::Struct(page), Type::Struct(audit)]);
        assert_eq!(keys(&definitions["Page"]), vec!["editor", "title"]);
    }

    #[test]
    fn test_required_tag_name_is_never_listed() {
        let odd = DefineStruct::new("Odd").with_member(field("Required", "bool", r#"json:"required""#));
        let definitions = render(vec![Type::Struct(odd)]);
        assert_eq!(keys(&definitions["Odd"]), vec!["required"]);
        assert!(definitions["Odd"].required.is_empty());
    }

    #[test]
    fn test_empty_struct() {
        let definitions = render(vec![Type::Struct(DefineStruct::new("Empty"))]);
        let value = serde_json::to_value(&definitions["Empty"]).unwrap();
        assert_eq!(value, json!({"type": "object", "title": "Empty", "properties": {}}));
    }
}

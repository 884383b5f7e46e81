//! Rendering of struct members as parameters and property schemas.

use crate::kinds::{parameter_type, schema_for_type};
use crate::spec::{Parameter, ParameterLocation, Schema};
use crate::tags::{fill_example, fill_field_options, fill_validate, is_required};
use indexmap::IndexMap;
use std::collections::HashSet;
use swagforge_spec::{
    DefineStruct, Member, TAG_EXAMPLE, TAG_FORM, TAG_HEADER, TAG_JSON, TAG_PATH, TAG_VALIDATE, Type,
};

/// Collects the parameters of one request struct.
///
/// Embedded structs are flattened into their host; one given only by
/// name is looked up in `types`. Path placeholders synthesized from the
/// URL template are kept in `pending` until a member declares the same
/// path parameter.
#[derive(Debug)]
pub struct ParameterCollector<'a> {
    method: &'a str,
    types: &'a [Type],
    pending: IndexMap<String, Parameter>,
    parameters: Vec<Parameter>,
    /// Some member resolved to `query`.
    pub contains_form: bool,
    /// Some member resolved to `body`.
    pub contains_json: bool,
}

impl<'a> ParameterCollector<'a> {
    /// `method` is the upper-case HTTP method of the route.
    pub fn new(method: &'a str, types: &'a [Type], pending: IndexMap<String, Parameter>) -> Self {
        Self {
            method,
            types,
            pending,
            parameters: Vec::new(),
            contains_form: false,
            contains_json: false,
        }
    }

    /// Walk `members` in declaration order, descending into embedded
    /// structs. Each embedded struct is expanded at most once.
    pub fn collect(&mut self, members: &[Member]) {
        let types = self.types;
        let mut expanded: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&Member> = members.iter().rev().collect();

        while let Some(member) = stack.pop() {
            if member.is_embedded() {
                if let Some(def) = member.ty.as_struct() {
                    if !expanded.insert(def.name.as_str()) {
                        swagforge_log::debug!("`{}` already expanded, skipping", def.name);
                        continue;
                    }
                    let def = resolve_struct(types, def);
                    stack.extend(def.members.iter().rev());
                }
                continue;
            }
            self.render_member(member);
        }
    }

    fn render_member(&mut self, member: &Member) {
        let mut parameter = render_parameter(member);

        let location = match parameter_location(member) {
            Some(location) => location,
            None if self.method == "GET" => ParameterLocation::Query,
            None => ParameterLocation::Body,
        };
        parameter.location = location;

        match location {
            ParameterLocation::Body => {
                self.contains_json = true;
                return;
            }
            ParameterLocation::Query => self.contains_form = true,
            ParameterLocation::Path => {
                parameter.required = true;
                if let Some(placeholder) = self.pending.shift_remove(&parameter.name) {
                    if parameter.description.is_empty() {
                        parameter.description = placeholder.description;
                    }
                }
            }
            _ => {}
        }

        self.parameters.push(parameter);
    }

    /// Member parameters followed by the placeholders no member claimed.
    pub fn finish(self) -> Vec<Parameter> {
        let mut parameters = self.parameters;
        parameters.extend(self.pending.into_values());
        parameters
    }
}

/// A member-less struct stands for the declaration of the same name.
pub fn resolve_struct<'a>(types: &'a [Type], def: &'a DefineStruct) -> &'a DefineStruct {
    if !def.members.is_empty() {
        return def;
    }
    types
        .iter()
        .filter_map(Type::as_struct)
        .find(|declared| declared.name == def.name)
        .unwrap_or(def)
}

fn parameter_location(member: &Member) -> Option<ParameterLocation> {
    match member.location_key()?.as_str() {
        TAG_HEADER => Some(ParameterLocation::Header),
        TAG_PATH => Some(ParameterLocation::Path),
        TAG_FORM => Some(ParameterLocation::Query),
        TAG_JSON => Some(ParameterLocation::Body),
        _ => None,
    }
}

/// Render a member as a non-body parameter.
///
/// The location is left as `query` when the member has no location tag;
/// the caller decides the default.
pub fn render_parameter(member: &Member) -> Parameter {
    let (param_type, format) = parameter_type(&member.ty);
    let location = parameter_location(member).unwrap_or(ParameterLocation::Query);
    let mut parameter = Parameter::new(String::new(), location);
    parameter.param_type = Some(param_type.clone());
    parameter.format = format;

    // Constraints are collected on a scratch schema of the same type and
    // copied over once all tags are seen.
    let mut scratch = Schema::typed(param_type);

    let location_key = member.location_key();
    for tag in member.tags() {
        match tag.key.as_str() {
            TAG_VALIDATE => fill_validate(&mut scratch, &tag),
            TAG_EXAMPLE => fill_example(&mut scratch, &tag),
            key if Some(key) == location_key.as_deref() => {
                parameter.name = tag.name.clone();
                parameter.required = is_required(&tag);
                fill_field_options(&mut scratch, &tag);
            }
            _ => {}
        }
    }

    if parameter.name.is_empty() {
        parameter.name = member.name.clone();
    }
    if !member.comment.is_empty() {
        parameter.description = member
            .comment
            .trim_start_matches('/')
            .replace("\\n", "\n")
            .trim()
            .to_string();
    }

    if parameter.location != ParameterLocation::Body {
        parameter.copy_constraints(&scratch);
    }
    parameter
}

/// Render a member as a definition property schema.
pub fn schema_of_field(member: &Member) -> Schema {
    let mut schema = schema_for_type(&member.ty);

    let comment = member.comment_text();
    let description = comment.replace("//", "").replace("\\n", "\n");
    schema.description = description.trim().to_string();

    for tag in member.tags() {
        match tag.key.as_str() {
            TAG_VALIDATE => fill_validate(&mut schema, &tag),
            TAG_EXAMPLE => fill_example(&mut schema, &tag),
            TAG_FORM | TAG_JSON => fill_field_options(&mut schema, &tag),
            _ => {}
        }
    }
    schema
}

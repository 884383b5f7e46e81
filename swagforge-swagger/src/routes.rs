//! Rendering of service routes as path items and operations.

use crate::kinds::schema_for_type;
use crate::member::{ParameterCollector, resolve_struct};
use crate::naming::format_name;
use crate::respdoc::parse_respdocs;
use crate::spec::{
    Operation, Parameter, ParameterLocation, PathItem, Properties, Response, Schema,
    SecurityRequirement,
};
use crate::tags::parse_bool;
use crate::text::unquote_or_empty;
use indexmap::IndexMap;
use swagforge_log::{debug, warn};
use swagforge_spec::{DefineStruct, Group, Route, Service, Type};

/// Name of the security scheme installed in every document.
pub const API_KEY: &str = "apiKey";

/// Description of the `200` response.
pub const SUCCESS_DESCRIPTION: &str = "A successful response.";

/// Content types of routes that only take form fields.
pub const FORM_CONSUMES: [&str; 2] = ["multipart/form-data", "application/x-www-form-urlencoded"];

const SUPPORTED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];
const FILE_PREFIX: &str = "file_";
const FILE_ARRAY_PREFIX: &str = "file_array_";

/// Renders every route of a service into `paths`.
#[derive(Debug, Clone)]
pub struct RouteRenderer<'a> {
    service: &'a Service,
    types: &'a [Type],
    tag_naming: &'a str,
    wrapper: Option<(&'a str, &'a str)>,
}

impl<'a> RouteRenderer<'a> {
    /// `types` is used to look up request structs that routes only name.
    pub fn new(service: &'a Service, types: &'a [Type], tag_naming: &'a str) -> Self {
        Self {
            service,
            types,
            tag_naming,
            wrapper: None,
        }
    }

    /// Wrap every success response in the `pack` definition, with the
    /// route's own response under `data_key`.
    pub fn with_wrapper(mut self, pack: &'a str, data_key: &'a str) -> Self {
        self.wrapper = Some((pack, data_key));
        self
    }

    /// Render all routes, group by group. A later route replaces an earlier
    /// one with the same path and method.
    pub fn render(&self, paths: &mut IndexMap<String, PathItem>) {
        for group in &self.service.groups {
            for route in &group.routes {
                let method = route.method.to_uppercase();
                if !SUPPORTED_METHODS.contains(&method.as_str()) {
                    warn!("dropping {} {}: unsupported method", route.method, route.path);
                    continue;
                }

                let (path, operation) = self.render_route(group, route);
                debug!("rendered {} {}", method, path);

                let item = paths.entry(path).or_default();
                if let Some(slot) = item.slot_mut(&method) {
                    *slot = Some(operation);
                }
            }
        }
    }

    /// Render one route. Returns the URL template and its operation.
    pub fn render_route(&self, group: &Group, route: &Route) -> (String, Operation) {
        let method = route.method.to_uppercase();
        let has_body = matches!(method.as_str(), "PUT" | "POST" | "PATCH" | "DELETE");

        let mut path = format!("{}{}", group.annotation("prefix"), route.path);
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        let (path, pending) = path_placeholders(&path, route);

        let mut parameters = file_parameters(route);
        let mut contains_form = !parameters.is_empty();
        let mut contains_json = false;

        match route
            .request_type
            .as_ref()
            .and_then(Type::as_struct)
            .map(|def| self.resolve(def))
        {
            Some(def) => {
                let mut collector = ParameterCollector::new(&method, self.types, pending);
                collector.collect(&def.members);
                contains_form |= collector.contains_form;
                contains_json = collector.contains_json;
                parameters.extend(collector.finish());

                if has_body && contains_json && !def.name.is_empty() {
                    parameters.push(body_parameter(def));
                }
            }
            None => parameters.extend(pending.into_values()),
        }

        let mut operation = Operation {
            summary: route.joined_doc().replace('"', ""),
            operation_id: route.handler.clone(),
            tags: vec![self.group_tag(group)],
            ..Default::default()
        };
        if !route.at_doc.properties.is_empty() {
            operation.description =
                unquote_or_empty(route.at_doc_property("description")).replace('"', "");
        }

        if has_body && contains_form && !contains_json && method != "DELETE" {
            operation.consumes = Some(FORM_CONSUMES.iter().map(|c| c.to_string()).collect());
            for parameter in &mut parameters {
                if parameter.location == ParameterLocation::Query {
                    parameter.location = ParameterLocation::FormData;
                }
            }
        }
        operation.parameters = parameters;

        operation.responses.insert(
            "200".to_string(),
            Response {
                description: SUCCESS_DESCRIPTION.to_string(),
                schema: self.success_schema(route),
            },
        );
        operation.responses.extend(parse_respdocs(&route.docs));

        if requires_jwt(group) {
            let requirement = SecurityRequirement::from([(API_KEY.to_string(), Vec::new())]);
            operation.security = Some(vec![requirement]);
        }

        (path, operation)
    }

    /// A request struct given only by name is looked up among the declared
    /// types.
    fn resolve<'b>(&'b self, def: &'b DefineStruct) -> &'b DefineStruct {
        resolve_struct(self.types, def)
    }

    fn success_schema(&self, route: &Route) -> Schema {
        let schema = route
            .response_type
            .as_ref()
            .filter(|ty| !ty.name().is_empty())
            .map(schema_for_type)
            .unwrap_or_default();

        match self.wrapper {
            Some((pack, data_key)) => {
                let mut data = Properties::new();
                data.insert(data_key.to_string(), schema);
                Schema {
                    all_of: vec![
                        Schema::reference(pack.trim_start_matches('/')),
                        Schema::object(data),
                    ],
                    ..Default::default()
                }
            }
            None => schema,
        }
    }

    /// The service name, or `<service>/<group>` when the group carries a
    /// `group` or `swtags` annotation (`swtags` wins).
    fn group_tag(&self, group: &Group) -> String {
        let mut tag = self.service.name.clone();

        for key in ["group", "swtags"] {
            let value = group.annotation(key);
            if value.is_empty() {
                continue;
            }
            match format_name(self.tag_naming, &self.service.name) {
                Ok(prefix) => {
                    tag = format!("{}/{}", prefix.trim_end_matches('/'), value.trim_start_matches('/'))
                }
                Err(err) => warn!("keeping tag `{}` for group `{}`: {}", tag, value, err),
            }
        }
        tag
    }
}

fn requires_jwt(group: &Group) -> bool {
    !group.annotation("jwt").is_empty() || group.annotation("middleware").to_lowercase().contains("jwt")
}

/// Replace `:name` segments with `{name}` and synthesize a required string
/// path parameter for each, in template order.
fn path_placeholders(path: &str, route: &Route) -> (String, IndexMap<String, Parameter>) {
    let mut pending = IndexMap::new();

    let segments: Vec<String> = path
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => {
                let mut parameter = Parameter::new(name, ParameterLocation::Path);
                parameter.required = true;
                parameter.param_type = Some("string".to_string());
                parameter.description = route.at_doc_property(name).trim_matches('"').to_string();
                pending.insert(name.to_string(), parameter);
                format!("{{{}}}", name)
            }
            _ => segment.to_string(),
        })
        .collect();

    (segments.join("/"), pending)
}

/// `file_<name>` and `file_array_<name>` entries of `@doc`, valued
/// `"<required>, <description>"`.
fn file_parameters(route: &Route) -> Vec<Parameter> {
    route
        .at_doc
        .properties
        .iter()
        .filter_map(|(key, value)| {
            let name = if let Some(name) = key.strip_prefix(FILE_ARRAY_PREFIX) {
                format!("{}[]", name)
            } else {
                key.strip_prefix(FILE_PREFIX)?.to_string()
            };

            let value = value.trim_matches('"');
            let (required, description) = value.split_once(',').unwrap_or((value, ""));

            let mut parameter = Parameter::new(name, ParameterLocation::FormData);
            parameter.param_type = Some("file".to_string());
            parameter.required = parse_bool(required).unwrap_or(false);
            parameter.description = description.trim().to_string();
            Some(parameter)
        })
        .collect()
}

/// The single `body` parameter standing for every json field.
fn body_parameter(def: &DefineStruct) -> Parameter {
    let mut parameter = Parameter::new("body", ParameterLocation::Body);
    parameter.required = true;
    parameter.description = def.docs.join(",").replace("//", "").trim().to_string();
    parameter.schema = Some(Box::new(Schema::reference(&def.name)));
    parameter
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swagforge_spec::Member;

    fn field(name: &str, ty: &str, tag: &str) -> Member {
        Member::new(name, Type::primitive(ty)).with_tag(tag)
    }

    fn render_one(group: Group, route: Route) -> (String, Operation) {
        let service = Service::new("UserApi");
        RouteRenderer::new(&service, &[], "lower").render_route(&group, &route)
    }

    #[test]
    fn test_path_parameters() {
        let route = Route::new("get", "/users/:id/orders/:orderId")
            .with_handler("GetOrder")
            .with_at_doc("id", "\"user id\"");
        let (path, operation) = render_one(Group::new(), route);

        assert_eq!(path, "/users/{id}/orders/{orderId}");
        assert_eq!(operation.operation_id, "GetOrder");
        let params: Vec<_> = operation
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.location, p.required, p.param_type.as_deref()))
            .collect();
        assert_eq!(
            params,
            vec![
                ("id", ParameterLocation::Path, true, Some("string")),
                ("orderId", ParameterLocation::Path, true, Some("string")),
            ]
        );
        assert_eq!(operation.parameters[0].description, "user id");
    }

    #[test]
    fn test_prefix_and_leading_slash() {
        let group = Group::new().with_annotation("prefix", "/api/v1");
        let (path, _) = render_one(group, Route::new("get", "/ping"));
        assert_eq!(path, "/api/v1/ping");

        let (path, _) = render_one(Group::new(), Route::new("get", "ping"));
        assert_eq!(path, "/ping");
    }

    #[test]
    fn test_json_request_gets_body_parameter() {
        let req = DefineStruct::new("CreateUserReq")
            .with_doc("// create a user")
            .with_member(field("Name", "string", r#"json:"name""#))
            .with_member(field("Token", "string", r#"header:"Authorization""#));
        let route = Route::new("post", "/users").with_request(Type::Struct(req));
        let (_, operation) = render_one(Group::new(), route);

        let value = serde_json::to_value(&operation.parameters).unwrap();
        assert_eq!(
            value,
            json!([
                {"name": "Authorization", "in": "header", "required": true, "type": "string"},
                {
                    "name": "body",
                    "description": "create a user",
                    "in": "body",
                    "required": true,
                    "schema": {"$ref": "#/definitions/CreateUserReq"}
                }
            ])
        );
        assert!(operation.consumes.is_none());
    }

    #[test]
    fn test_form_only_post_switches_to_form_data() {
        let req = DefineStruct::new("UploadReq")
            .with_member(field("Title", "string", r#"form:"title""#));
        let route = Route::new("post", "/upload")
            .with_request(Type::Struct(req))
            .with_at_doc("file_avatar", "\"true, profile picture\"");
        let (_, operation) = render_one(Group::new(), route);

        assert_eq!(
            operation.consumes,
            Some(vec![
                "multipart/form-data".to_string(),
                "application/x-www-form-urlencoded".to_string()
            ])
        );
        assert!(operation
            .parameters
            .iter()
            .all(|p| p.location == ParameterLocation::FormData));
        assert_eq!(operation.parameters[0].name, "avatar");
        assert_eq!(operation.parameters[0].param_type.as_deref(), Some("file"));
        assert!(operation.parameters[0].required);
        assert_eq!(operation.parameters[0].description, "profile picture");
    }

    #[test]
    fn test_form_delete_keeps_query() {
        let req = DefineStruct::new("DeleteReq").with_member(field("Id", "int64", r#"form:"id""#));
        let route = Route::new("delete", "/users").with_request(Type::Struct(req));
        let (_, operation) = render_one(Group::new(), route);

        assert!(operation.consumes.is_none());
        assert_eq!(operation.parameters[0].location, ParameterLocation::Query);
    }

    #[test]
    fn test_file_array_parameters_sorted() {
        let route = Route::new("post", "/files")
            .with_at_doc("file_b", "false")
            .with_at_doc("file_array_a", "\"true, many\"");
        let (_, operation) = render_one(Group::new(), route);

        let names: Vec<_> = operation.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a[]", "b"]);
        assert!(!operation.parameters[1].required);
    }

    #[test]
    fn test_request_resolved_from_declared_types() {
        let declared = vec![Type::Struct(
            DefineStruct::new("ListReq").with_member(field("Page", "int", r#"form:"page""#)),
        )];
        let service = Service::new("svc");
        let route = Route::new("get", "/items").with_request(Type::named("ListReq"));
        let (_, operation) =
            RouteRenderer::new(&service, &declared, "lower").render_route(&Group::new(), &route);

        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].name, "page");
    }

    #[test]
    fn test_embedded_struct_parameters_and_definition_agree() {
        let declared = vec![
            Type::Struct(
                DefineStruct::new("Paging")
                    .with_member(field("Page", "int", r#"form:"page""#))
                    .with_member(field("Size", "int", r#"form:"size""#)),
            ),
            Type::Struct(
                DefineStruct::new("ListReq")
                    .with_member(Member::embedded(DefineStruct::new("Paging")))
                    .with_member(field("Keyword", "string", r#"form:"keyword""#)),
            ),
        ];
        let service = Service::new("svc");
        let route = Route::new("get", "/items").with_request(Type::named("ListReq"));
        let (_, operation) =
            RouteRenderer::new(&service, &declared, "lower").render_route(&Group::new(), &route);

        let names: Vec<_> = operation.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["page", "size", "keyword"]);
        assert!(operation.parameters.iter().all(|p| p.location == ParameterLocation::Query));
    }

    #[test]
    fn test_success_response_shapes() {
        let route = Route::new("get", "/users").with_response(Type::array(Type::pointer(Type::named("UserInfo"))));
        let (_, operation) = render_one(Group::new(), route);
        let ok = &operation.responses["200"];
        assert_eq!(ok.description, "A successful response.");
        assert_eq!(
            serde_json::to_value(&ok.schema).unwrap(),
            json!({"type": "array", "items": {"$ref": "#/definitions/UserInfo"}})
        );

        let (_, operation) = render_one(Group::new(), Route::new("get", "/ping"));
        assert_eq!(operation.responses["200"].schema, Schema::default());
    }

    #[test]
    fn test_wrapped_response() {
        let service = Service::new("svc");
        let renderer = RouteRenderer::new(&service, &[], "lower").with_wrapper("/Response", "data");
        let route = Route::new("get", "/me").with_response(Type::named("UserInfo"));
        let (_, operation) = renderer.render_route(&Group::new(), &route);

        assert_eq!(
            serde_json::to_value(&operation.responses["200"].schema).unwrap(),
            json!({
                "allOf": [
                    {"$ref": "#/definitions/Response"},
                    {"type": "object", "properties": {"data": {"$ref": "#/definitions/UserInfo"}}}
                ]
            })
        );
    }

    #[test]
    fn test_docs_and_respdoc() {
        let route = Route::new("get", "/users/:id")
            .with_handler("GetUser")
            .with_doc("fetch \"one\" user")
            .with_doc("@respdoc-404 (NotFound) // no such user")
            .with_at_doc("description", "\"Looks up a \\\"user\\\"\"");
        let (_, operation) = render_one(Group::new(), route);

        assert_eq!(operation.summary, "fetch one user @respdoc-404 (NotFound) // no such user");
        assert_eq!(operation.description, "Looks up a user");
        assert_eq!(operation.responses["404"].description, "no such user");
        assert_eq!(operation.responses["404"].schema, Schema::reference("NotFound"));
    }

    #[test]
    fn test_group_tags_and_security() {
        let (_, operation) = render_one(Group::new(), Route::new("get", "/a"));
        assert_eq!(operation.tags, vec!["UserApi"]);
        assert!(operation.security.is_none());

        let group = Group::new()
            .with_annotation("group", "users")
            .with_annotation("middleware", "Log,JwtCheck");
        let (_, operation) = render_one(group, Route::new("get", "/a"));
        assert_eq!(operation.tags, vec!["userapi/users"]);
        assert_eq!(
            serde_json::to_value(&operation.security).unwrap(),
            json!([{"apiKey": []}])
        );

        let group = Group::new()
            .with_annotation("group", "users")
            .with_annotation("swtags", "accounts")
            .with_annotation("jwt", "Auth");
        let (_, operation) = render_one(group, Route::new("get", "/a"));
        assert_eq!(operation.tags, vec!["userapi/accounts"]);
        assert!(operation.security.is_some());
    }

    #[test]
    fn test_invalid_naming_style_keeps_service_tag() {
        let service = Service::new("UserApi");
        let group = Group::new().with_annotation("group", "users");
        let (_, operation) = RouteRenderer::new(&service, &[], "shouting")
            .render_route(&group, &Route::new("get", "/a"));
        assert_eq!(operation.tags, vec!["UserApi"]);
    }

    #[test]
    fn test_render_skips_unsupported_and_overwrites() {
        let service = Service::new("svc").with_group(
            Group::new()
                .with_route(Route::new("get", "/a").with_handler("First"))
                .with_route(Route::new("options", "/b"))
                .with_route(Route::new("get", "/a").with_handler("Second")),
        );
        let mut paths = IndexMap::new();
        RouteRenderer::new(&service, &[], "lower").render(&mut paths);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths["/a"].get.as_ref().unwrap().operation_id, "Second");
    }
}

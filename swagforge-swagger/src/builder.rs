//! Document assembly

use crate::definitions::render_definitions;
use crate::error::{Result, SwaggerError};
use crate::routes::{API_KEY, RouteRenderer};
use crate::spec::*;
use crate::text::unquote_or_empty;
use crate::wrapper::{ResponseWrapper, default_wrapper, parse_response};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use swagforge_config::{DEFAULT_TAG_NAMING, GeneratorConfig};
use swagforge_log::{debug, info};
use swagforge_spec::ApiSpec;

/// Schemes a document may list.
pub const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

/// Schemes used when none are configured.
pub const DEFAULT_SCHEMES: [&str; 2] = ["http", "https"];

/// Request and response content type.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Builder for Swagger documents
#[derive(Debug, Clone)]
pub struct SwaggerBuilder {
    document: SwaggerDocument,
}

impl SwaggerBuilder {
    /// Create a new builder with JSON consumes/produces and default schemes
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            document: SwaggerDocument {
                swagger: "2.0".to_string(),
                info: Info {
                    title: title.into(),
                    description: String::new(),
                    version: version.into(),
                },
                host: String::new(),
                base_path: String::new(),
                schemes: DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect(),
                consumes: vec![JSON_CONTENT_TYPE.to_string()],
                produces: vec![JSON_CONTENT_TYPE.to_string()],
                paths: IndexMap::new(),
                definitions: BTreeMap::new(),
                security_definitions: BTreeMap::new(),
            },
        }
    }

    /// Set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.document.info.description = description.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.document.host = host.into();
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.document.base_path = base_path.into();
        self
    }

    pub fn schemes(mut self, schemes: Vec<String>) -> Self {
        self.document.schemes = schemes;
        self
    }

    /// Add a path
    pub fn path(mut self, path: impl Into<String>, item: PathItem) -> Self {
        self.document.paths.insert(path.into(), item);
        self
    }

    /// Add a definition
    pub fn definition(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.document.definitions.insert(name.into(), schema);
        self
    }

    /// Add a security scheme
    pub fn security_definition(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.document.security_definitions.insert(name.into(), scheme);
        self
    }

    /// Add the `Authorization` header API key scheme
    pub fn add_api_key_auth(self, name: impl Into<String>) -> Self {
        self.security_definition(
            name,
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                description: "Enter JWT Bearer token **_only_**".to_string(),
                name: "Authorization".to_string(),
                location: "header".to_string(),
            },
        )
    }

    /// Mutable access to the paths, for renderers
    pub fn paths_mut(&mut self) -> &mut IndexMap<String, PathItem> {
        &mut self.document.paths
    }

    /// Mutable access to the definitions, for renderers
    pub fn definitions_mut(&mut self) -> &mut BTreeMap<String, Schema> {
        &mut self.document.definitions
    }

    /// Build the Swagger document
    pub fn build(self) -> SwaggerDocument {
        self.document
    }
}

/// Split a comma separated scheme list, rejecting anything outside
/// [`SUPPORTED_SCHEMES`]. An empty list yields the defaults.
pub fn parse_schemes(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect());
    }

    raw.split(',')
        .map(|scheme| {
            let scheme = scheme.trim();
            if SUPPORTED_SCHEMES.contains(&scheme) {
                Ok(scheme.to_string())
            } else {
                Err(SwaggerError::UnsupportedScheme(scheme.to_string()))
            }
        })
        .collect()
}

/// Transform a parsed API definition into a Swagger document.
pub fn generate(api: &ApiSpec, config: &GeneratorConfig) -> Result<SwaggerDocument> {
    info!("generating swagger document for service `{}`", api.service.name);

    let schemes = parse_schemes(config.schemes.as_deref().unwrap_or(""))?;

    let mut builder = SwaggerBuilder::new(
        unquote_or_empty(api.info.property("title")),
        unquote_or_empty(api.info.property("version")),
    )
    .description(unquote_or_empty(api.info.property("desc")))
    .host(config.host.clone().unwrap_or_default())
    .base_path(config.base_path.clone().unwrap_or_default())
    .schemes(schemes)
    .add_api_key_auth(API_KEY);

    let pack = config.pack.as_deref().filter(|p| !p.is_empty());
    let wrapper = match pack {
        Some(pack) => {
            let wrapper = match config.response.as_deref().filter(|r| !r.trim().is_empty()) {
                Some(response) => parse_response(response)?,
                None => default_wrapper(),
            };
            let ResponseWrapper { schema, data_key } = wrapper;
            builder = builder.definition(pack.trim_start_matches('/'), schema);
            Some((pack, data_key))
        }
        None => None,
    };

    let tag_naming = if config.tag_naming.is_empty() {
        DEFAULT_TAG_NAMING
    } else {
        config.tag_naming.as_str()
    };
    let mut renderer = RouteRenderer::new(&api.service, &api.types, tag_naming);
    if let Some((pack, data_key)) = &wrapper {
        renderer = renderer.with_wrapper(pack, data_key);
    }
    renderer.render(builder.paths_mut());

    render_definitions(builder.definitions_mut(), &api.types);

    let document = builder.build();
    debug!(
        "assembled {} paths and {} definitions",
        document.paths.len(),
        document.definitions.len()
    );
    Ok(document)
}

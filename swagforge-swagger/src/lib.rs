//! Swagger 2.0 document generation from parsed API definitions
//!
//! This crate turns an [`ApiSpec`](swagforge_spec::ApiSpec) (service,
//! groups, routes and struct declarations with field tags) into a
//! [`SwaggerDocument`] ready to be serialized as JSON.
//!
//! ## Features
//!
//! - 📝 **Routes to operations** - path placeholders, header/path/query/form
//!   parameters, a single aggregated `body` parameter
//! - 📋 **Definitions** - one object schema per struct, with embedded structs
//!   flattened and `required` derived from tag options
//! - 🏷️ **Tag constraints** - `validate`, `example`, `default=`, `options=`,
//!   `range=` become schema constraints
//! - 📦 **Response wrapping** - an optional envelope definition composed with
//!   `allOf`
//! - 🔐 **JWT** - routes of `jwt` groups require the `apiKey` scheme
//!
//! ## Quick Start
//!
//! ```
//! use swagforge_config::GeneratorConfig;
//! use swagforge_spec::{ApiSpec, DefineStruct, Group, Member, Route, Service, Type};
//! use swagforge_swagger::generate;
//!
//! let user = DefineStruct::new("User")
//!     .with_member(Member::new("Id", Type::primitive("int64")).with_tag(r#"json:"id""#));
//! let api = ApiSpec {
//!     types: vec![Type::Struct(user.clone())],
//!     service: Service::new("user-api").with_group(
//!         Group::new().with_route(
//!             Route::new("get", "/users/:id")
//!                 .with_handler("GetUser")
//!                 .with_response(Type::Struct(user)),
//!         ),
//!     ),
//!     ..Default::default()
//! };
//!
//! let document = generate(&api, &GeneratorConfig::default()).unwrap();
//! assert!(document.paths.contains_key("/users/{id}"));
//! assert!(document.definitions.contains_key("User"));
//! ```
//!
//! ## Wrapping Responses
//!
//! ```
//! use swagforge_config::GeneratorConfig;
//! use swagforge_spec::{ApiSpec, Group, Route, Service, Type};
//! use swagforge_swagger::generate;
//!
//! let api = ApiSpec {
//!     service: Service::new("svc").with_group(
//!         Group::new().with_route(Route::new("get", "/me").with_response(Type::named("Me"))),
//!     ),
//!     ..Default::default()
//! };
//! let config = GeneratorConfig {
//!     pack: Some("Response".to_string()),
//!     ..Default::default()
//! };
//!
//! let document = generate(&api, &config).unwrap();
//! let schema = &document.paths["/me"].get.as_ref().unwrap().responses["200"].schema;
//! assert_eq!(schema.all_of.len(), 2);
//! assert!(document.definitions.contains_key("Response"));
//! ```

pub mod builder;
pub mod definitions;
pub mod error;
pub mod kinds;
pub mod member;
pub mod naming;
pub mod output;
pub mod respdoc;
pub mod routes;
pub mod spec;
pub mod tags;
pub mod text;
pub mod wrapper;

pub use builder::{SwaggerBuilder, generate, parse_schemes};
pub use error::{NamingError, Result, SwaggerError};
pub use naming::{NamingStyle, format_name};
pub use output::write_document;
pub use spec::*;
pub use wrapper::{DEFAULT_RESPONSE_JSON, ResponseWrapper, default_wrapper, parse_response};

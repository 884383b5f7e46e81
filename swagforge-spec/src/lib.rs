//! Parsed API definition model.
//!
//! This crate holds the tree that the swagforge generator consumes: a
//! service made of route groups, the struct types referenced by those
//! routes, and the raw field tags and doc annotations attached to them.
//! Nothing here validates the definition; it is taken as already parsed.
//!
//! ## Building a definition
//!
//! ```
//! use swagforge_spec::{DefineStruct, Group, Member, Route, Service, Type};
//!
//! let request = DefineStruct::new("GetUserReq")
//!     .with_member(Member::new("Id", Type::primitive("int64")).with_tag(r#"path:"id""#));
//!
//! let service = Service::new("user-api").with_group(
//!     Group::new()
//!         .with_annotation("prefix", "/api/v1")
//!         .with_route(
//!             Route::new("get", "/users/:id")
//!                 .with_handler("GetUser")
//!                 .with_request(Type::Struct(request))
//!                 .with_response(Type::named("UserInfo")),
//!         ),
//! );
//!
//! assert_eq!(service.groups[0].annotation("prefix"), "/api/v1");
//! ```
//!
//! ## Loading from JSON
//!
//! ```
//! use swagforge_spec::Plugin;
//!
//! let plugin = Plugin::from_json(r#"{"api":{"service":{"name":"user-api"}}}"#).unwrap();
//! assert_eq!(plugin.api.service.name, "user-api");
//! ```

pub mod error;
pub mod plugin;
pub mod tag;
pub mod types;

pub use error::{Result, SpecError};
pub use plugin::Plugin;
pub use tag::*;
pub use types::*;

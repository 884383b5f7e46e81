// swagforge - Swagger 2.0 documents from parsed API definitions
//
// The workspace is split into the API definition model (`swagforge-spec`),
// generator settings (`swagforge-config`), the document generator
// (`swagforge-swagger`) and logging (`swagforge-log`). This crate
// re-exports them behind one name.

// Re-export the generator
pub use swagforge_swagger::*;

// Re-export the API definition model
pub use swagforge_spec as api;

// Re-export optional crates
#[cfg(feature = "config")]
pub use swagforge_config;

#[cfg(feature = "config")]
pub use swagforge_config::GeneratorConfig;

#[cfg(feature = "log")]
pub use swagforge_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::api::{
        ApiSpec, DefineStruct, Group, Member, Plugin, Route, Service, Type,
    };
    pub use crate::{
        NamingStyle, Schema, SwaggerBuilder, SwaggerDocument, SwaggerError, generate,
        write_document,
    };

    #[cfg(feature = "config")]
    pub use crate::GeneratorConfig;
}

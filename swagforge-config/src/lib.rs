// Configuration for the swagforge document generator
//
// Settings are layered: built-in defaults, then an optional json/toml/env
// file, then `SWAGFORGE_*` environment variables. The CLI applies its flags
// last.

pub mod config;
pub mod env;
pub mod error;
pub mod loader;

pub use config::{DEFAULT_FILENAME, DEFAULT_TAG_NAMING, ENV_PREFIX, GeneratorConfig};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

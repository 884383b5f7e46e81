// Generator configuration

use crate::env::EnvLoader;
use crate::loader::ConfigLoader;
use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Prefix for environment overrides, e.g. `SWAGFORGE_HOST`.
pub const ENV_PREFIX: &str = "SWAGFORGE";

/// Default output file name.
pub const DEFAULT_FILENAME: &str = "swagger.json";

/// Default naming style for generated operation tags.
pub const DEFAULT_TAG_NAMING: &str = "lower";

/// Keys read from configuration files and the environment.
const KNOWN_KEYS: &[&str] = &[
    "host",
    "base_path",
    "basePath",
    "basepath",
    "schemes",
    "filename",
    "pack",
    "response",
    "tag_naming",
];

/// Everything the document generator needs besides the API definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// `host` of the document; omitted when empty.
    pub host: Option<String>,
    /// `basePath` of the document; omitted when empty.
    #[serde(alias = "basePath", alias = "basepath")]
    pub base_path: Option<String>,
    /// Comma separated schemes. `None` means `http,https`.
    pub schemes: Option<String>,
    /// Output file name.
    pub filename: String,
    /// Name of the outer response wrapper definition.
    pub pack: Option<String>,
    /// JSON array describing the wrapper fields. Only valid with `pack`.
    pub response: Option<String>,
    /// Naming style applied to the service name in operation tags.
    pub tag_naming: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            host: None,
            base_path: None,
            schemes: None,
            filename: DEFAULT_FILENAME.to_string(),
            pack: None,
            response: None,
            tag_naming: DEFAULT_TAG_NAMING.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, then `file` (if any), then `SWAGFORGE_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = file {
            config.merge_file(path)?;
        }

        let env = EnvLoader::new(Some(ENV_PREFIX.to_string()));
        env.load_dotenv(None)?;
        config.merge_env(&env.load());

        Ok(config)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let value = ConfigLoader::for_path(path)?.load_file(path)?;
        self.merge_value(&value)
    }

    /// Overlay keys from a parsed configuration object. Unknown keys are
    /// ignored so one file can also carry logging settings.
    pub fn merge_value(&mut self, value: &Value) -> Result<()> {
        let Some(map) = value.as_object() else {
            return Err(ConfigError::ParseError(
                "configuration root must be an object".to_string(),
            ));
        };

        for (key, value) in map {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                continue;
            }
            match key.as_str() {
                // A wrapper layout may be written inline as an array.
                "response" if value.is_array() => {
                    self.response = Some(value.to_string());
                }
                _ => {
                    if let Some(text) = scalar_text(key, value)? {
                        self.set(key, text);
                    }
                }
            }
        }
        Ok(())
    }

    /// Overlay already-stripped environment keys (`host`, `base_path`, ...).
    pub fn merge_env(&mut self, vars: &HashMap<String, String>) {
        for (key, value) in vars {
            self.set(key, value.clone());
        }
    }

    fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "host" => &mut self.host,
            "base_path" | "basepath" | "basePath" => &mut self.base_path,
            "schemes" => &mut self.schemes,
            "pack" => &mut self.pack,
            "response" => &mut self.response,
            "filename" => {
                self.filename = value;
                return;
            }
            "tag_naming" => {
                self.tag_naming = value;
                return;
            }
            _ => return,
        };
        *slot = Some(value).filter(|v| !v.is_empty());
    }

    /// Cross-field checks that do not need the API definition.
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "filename cannot be empty".to_string(),
            ));
        }
        if self.response.is_some() && self.pack.is_none() {
            return Err(ConfigError::ValidationError(
                "`response` requires `pack` to name the wrapper".to_string(),
            ));
        }
        Ok(())
    }
}

fn scalar_text(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(items) if key == "schemes" => {
            let schemes: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            Ok(Some(schemes.join(",")))
        }
        Value::Number(_) | Value::Bool(_) => Ok(Some(value.to_string())),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "expected a string".to_string(),
        }),
    }
}

//! Payload handed over by the host tool that parsed the API definition.

use crate::error::Result;
use crate::types::ApiSpec;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A parsed API definition plus the context it was parsed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub api: ApiSpec,
    #[serde(default)]
    pub api_file_path: String,
    #[serde(default)]
    pub style: String,
    /// Directory the host expects output to be written to.
    #[serde(default)]
    pub dir: String,
}

impl Plugin {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json(&content)
    }
}

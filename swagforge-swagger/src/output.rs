//! Serialization of the finished document.

use crate::error::Result;
use crate::spec::SwaggerDocument;
use std::fs;
use std::path::{Path, PathBuf};

impl SwaggerDocument {
    /// Two-space indented JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Write `document` to `dir/filename`, creating `dir` if needed. Returns
/// the written path.
pub fn write_document(document: &SwaggerDocument, dir: &Path, filename: &str) -> Result<PathBuf> {
    let json = document.to_json_pretty()?;

    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, json)?;

    swagforge_log::info!("wrote {}", path.display());
    Ok(path)
}

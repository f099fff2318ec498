//! Load phase: DSL text → generic document tree.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse DSL text into a document tree.
pub fn parse_str(text: &str, format: Format) -> Result<Value, LoadError> {
    match format {
        // An empty YAML stream is a null document.
        Format::Yaml if text.trim().is_empty() => Ok(Value::Null),
        Format::Yaml => {
            let mut yaml = serde_yaml::from_str::<serde_yaml::Value>(text)?;
            yaml.apply_merge()?;
            serde_json::to_value(yaml).map_err(|e| LoadError::Yaml(e.to_string()))
        }
        Format::Json => Ok(serde_json::from_str::<Value>(text)?),
    }
}

/// Read and parse a DSL file.
pub fn load_file(path: &Path) -> Result<Value, LoadError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "workflow file not found");
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "failed to read workflow file");
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let format = Format::from_path(path);
    debug!(path = %path.display(), ?format, bytes = text.len(), "parsing workflow file");
    parse_str(&text, format).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to parse workflow file");
    })
}

//! Text rendering for resource documents

use crate::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Output formats for rendered templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Render as YAML
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// Render as pretty-printed JSON with a trailing newline
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Render in the given format
pub fn render<T: Serialize>(value: &T, format: Format) -> Result<String> {
    match format {
        Format::Yaml => to_yaml(value),
        Format::Json => to_json(value),
    }
}

/// Lowercase hex SHA-256 of rendered content
pub fn checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

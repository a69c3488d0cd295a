// crates/release-sentinel-config/src/document.rs
// ============================================================================
// Module: Release Sentinel Documents
// Description: Bounded reading and format-aware parsing of input documents.
// Purpose: Turn a path on disk into a mapping-rooted JSON value.
// Dependencies: serde_json, serde_yaml, toml
// ============================================================================

//! ## Overview
//! Documents are read with hard path and size limits, decoded as UTF-8, and
//! parsed according to their extension. The parsed root must be a mapping; an
//! empty document counts as an empty mapping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Map;
use serde_json::Value;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum document size in bytes.
pub const MAX_DOCUMENT_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl DocumentFormat {
    /// Picks a format from the path extension; unknown extensions are YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "toml" => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Parses text in this format into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is malformed.
    pub fn parse(self, content: &str) -> Result<Value, ConfigError> {
        match self {
            Self::Yaml => {
                if content.trim().is_empty() {
                    return Ok(Value::Null);
                }
                serde_yaml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Self::Json => {
                serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Self::Toml => {
                toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Reading
// ============================================================================

/// Reads a document and returns its mapping root.
///
/// # Errors
///
/// Returns [`ConfigError`] when the path violates limits, the file cannot be
/// read, the content is not UTF-8 or fails to parse, or the root is not a
/// mapping.
pub fn read_document(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    validate_path(path)?;
    let bytes = read_file_limited(path, MAX_DOCUMENT_SIZE)?;
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid(format!("{} must be utf-8", path.display())))?;
    let value = DocumentFormat::from_path(path).parse(content)?;
    mapping_root(value, path)
}

/// Applies the mapping-root rule to a parsed document.
pub(crate) fn mapping_root(value: Value, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::Invalid(format!("expected mapping at root of {}", path.display()))),
    }
}

/// Validates a path against length limits.
pub(crate) fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("document path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("document path component too long".to_string()));
        }
    }
    Ok(())
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ConfigError> {
    let file = File::open(path)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    let limit = u64::try_from(max_bytes.saturating_add(1))
        .map_err(|_| ConfigError::Invalid("document size limit exceeds u64".to_string()))?;
    let mut buf = Vec::new();
    file.take(limit)
        .read_to_end(&mut buf)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if buf.len() > max_bytes {
        return Err(ConfigError::Invalid(format!("{} exceeds size limit", path.display())));
    }
    Ok(buf)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("p.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("p.TOML")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("p.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("policies")), DocumentFormat::Yaml);
    }

    #[test]
    fn empty_yaml_is_empty_mapping() -> Result<(), String> {
        let value = DocumentFormat::Yaml.parse("  \n").map_err(|err| err.to_string())?;
        let map = mapping_root(value, Path::new("p.yaml")).map_err(|err| err.to_string())?;
        assert!(map.is_empty());
        Ok(())
    }

    #[test]
    fn sequence_root_is_rejected() -> Result<(), String> {
        let value = DocumentFormat::Yaml.parse("- a\n- b\n").map_err(|err| err.to_string())?;
        let Err(err) = mapping_root(value, Path::new("p.yaml")) else {
            return Err("expected sequence root to be rejected".to_string());
        };
        assert_eq!(err.to_string(), "invalid config: expected mapping at root of p.yaml");
        Ok(())
    }

    #[test]
    fn overlong_component_is_rejected() {
        let path = format!("dir/{}.yaml", "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1));
        assert!(validate_path(Path::new(&path)).is_err());
    }
}

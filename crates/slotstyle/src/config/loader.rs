//! Parsing author configs from YAML, JSON and files.

use std::path::Path;

use super::StyledConfig;
use crate::error::ConfigError;

/// Recognized config file extensions in priority order.
///
/// When files with the same base name exist in one directory, the extension
/// appearing earlier wins.
pub const CONFIG_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json"];

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> Option<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Some(Format::Yaml),
        Some("json") => Some(Format::Json),
        _ => None,
    }
}

impl StyledConfig {
    /// Parses a config from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the YAML is malformed or does not
    /// describe a config (unknown top-level key, nested selector, non-scalar
    /// property value).
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotstyle::StyledConfig;
    ///
    /// let config = StyledConfig::from_yaml(r#"
    /// base:
    ///   root: { fg: white }
    /// variants:
    ///   intent:
    ///     danger:
    ///       root:
    ///         fg: red
    ///         _active: { fg: darkred }
    /// defaultVariants:
    ///   intent: danger
    /// "#).unwrap();
    ///
    /// assert!(config.compound_variants.is_none());
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(StyledConfig::new());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse(e.to_string()))
    }

    /// Parses a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::parse(e.to_string()))
    }

    /// Loads a config from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for other extensions,
    /// [`ConfigError::Load`] if the file cannot be read, and
    /// [`ConfigError::Parse`] (carrying the path) if parsing fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = format_of(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::load(format!("Failed to read {}: {}", path.display(), e)))?;

        let parsed = match format {
            Format::Yaml => Self::from_yaml(&content),
            Format::Json => Self::from_json(&content),
        };
        parsed.map_err(|e| e.with_path(path))
    }

    /// Serializes the config to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::parse(e.to_string()))
    }
}

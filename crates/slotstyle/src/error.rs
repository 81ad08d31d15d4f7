//! Error types.
//!
//! The engine's error surface is deliberately small: building a styled
//! definition can fail, loading a config from text or disk can fail, and
//! nothing else does. Normalization, merging and resolution are total.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while building a styled definition.
#[derive(Debug, Error)]
pub enum StyledError {
    /// The styled target does not declare slots and states.
    #[error("component '{component}' has no style metadata; declare its slots and states before styling it")]
    MissingMetadata { component: String },
}

/// Errors raised while loading author configs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// YAML or JSON content could not be parsed into a config.
    #[error("failed to parse style config{}: {message}", location(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Message from the underlying parser.
        message: String,
    },

    /// A file or directory could not be read.
    #[error("failed to load style config: {message}")]
    Load { message: String },

    /// The file extension does not map to a known format.
    #[error("unsupported style config format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// No config is registered under the requested name.
    #[error("style config '{name}' not found")]
    NotFound { name: String },
}

impl ConfigError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        ConfigError::Parse {
            path: None,
            message: message.into(),
        }
    }

    pub(crate) fn load(message: impl Into<String>) -> Self {
        ConfigError::Load {
            message: message.into(),
        }
    }

    /// Attaches a source path to a parse error.
    pub(crate) fn with_path(self, source: &Path) -> Self {
        match self {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(source.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

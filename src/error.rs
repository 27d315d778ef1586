use thiserror::Error;

use crate::value::Kind;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Every failure the crate can report. Nothing in the core panics; see [`crate::must`]
/// for the one place that turns an error into a process abort.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed path syntax, e.g. `a..b` or a trailing dot.
    #[error("Invalid path {path:?}: empty segment (paths look like `server.hosts.0`)")]
    InvalidPath { path: String },

    /// Well-formed path that does not lead anywhere in the tree.
    #[error("Invalid path {path:?} (found: {found:?}; not found: {missing:?})")]
    NotFound {
        path: String,
        found: String,
        missing: String,
    },

    #[error("Type mismatch at {path:?}: expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: Kind,
    },

    #[error("Unsupported map key: {key}")]
    UnsupportedKey { key: String },

    #[error("Unsupported value: {raw}")]
    UnsupportedValue {
        raw: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Unsupported type: {kind}")]
    UnsupportedType { kind: String },

    #[error("Failed to read {path:?}: {source} (check that the file exists and is readable)")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot infer config format of {path:?} (use a .json, .yaml or .yml extension)")]
    UnknownFormat { path: String },
}

impl ConfigError {
    /// True when the path was well-formed but nothing lives there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ConfigError::TypeMismatch { .. })
    }

    pub(crate) fn unsupported_value(raw: impl std::fmt::Debug, source: ConfigError) -> Self {
        ConfigError::UnsupportedValue {
            raw: format!("{:?}", raw),
            source: Box::new(source),
        }
    }
}

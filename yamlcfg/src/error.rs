//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while locating, reading or parsing a YAML document
#[derive(Error, Debug)]
pub enum LoadError {
    /// The configuration name was empty
    #[error("Config name cannot be empty")]
    EmptyName,

    /// No `<name>.yaml` / `<name>.yml` in the search path
    #[error("Config '{name}' not found in {}", .search_path.display())]
    NotFound { name: String, search_path: PathBuf },

    /// IO error reading the configuration file
    #[error("Failed to read config '{name}' from {}: {source}", .path.display())]
    Read {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse config '{name}' from {}: {source}", .path.display())]
    Parse {
        name: String,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Parsed, but not a document we can address by key
    #[error("Invalid config '{name}': {message}")]
    InvalidDocument { name: String, message: String },
}

impl LoadError {
    /// Name of the configuration the failed load was attempting
    pub fn config_name(&self) -> Option<&str> {
        match self {
            LoadError::EmptyName => None,
            LoadError::NotFound { name, .. }
            | LoadError::Read { name, .. }
            | LoadError::Parse { name, .. }
            | LoadError::InvalidDocument { name, .. } => Some(name),
        }
    }
}

/// Failure turning YAML text into a [`Document`](crate::value::Document)
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Not valid YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Valid YAML, but not addressable by key
    #[error("{0}")]
    Invalid(String),
}

/// Errors raised by keyed lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The caller supplied an empty key
    #[error("Key name cannot be empty")]
    EmptyKey,

    /// Nothing is stored at the key, or no document is loaded
    #[error("Did not find key {0}")]
    NotFound(String),

    /// A value exists but cannot be converted to the requested type
    #[error("Value of key {key} is {actual}, cannot convert to {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: String,
    },

    /// A sub-tree failed to deserialize into the requested type
    #[error("Failed to deserialize key {key}: {message}")]
    Deserialize { key: String, message: String },
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            LookupError::TypeMismatch { .. } | LookupError::Deserialize { .. }
        )
    }
}

/// Umbrella error for callers that handle loads and lookups together
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

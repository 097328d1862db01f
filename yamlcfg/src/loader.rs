//! Configuration loading and typed key lookups

use crate::error::{DocumentError, LoadError, LookupError};
use crate::key::ConfigKey;
use crate::search_path::SearchPath;
use crate::value::{ConfigValue, Document};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Handle over one search path and the most recently loaded document.
///
/// Loading takes `&mut self`; a handle shared between threads needs
/// external synchronization (for example a `RwLock<YamlConfig>`).
#[derive(Debug, Clone)]
pub struct YamlConfig {
    search_path: SearchPath,
    document: Option<Document>,
    /// File the current document came from
    loaded_path: Option<PathBuf>,
}

impl YamlConfig {
    /// Create a handle whose search path comes from `YAMLCFG_PATH`
    pub fn new() -> Self {
        Self::with_search(SearchPath::from_env())
    }

    /// Create a handle whose search path comes from a custom variable
    pub fn from_env_var(name: impl Into<String>) -> Self {
        Self::with_search(SearchPath::from_env_var(name))
    }

    /// Create a handle that searches `dir` regardless of the environment
    pub fn with_search_path(dir: impl Into<PathBuf>) -> Self {
        Self::with_search(SearchPath::new(dir))
    }

    /// Create a handle over an already resolved search path
    pub fn with_search(search_path: SearchPath) -> Self {
        Self {
            search_path,
            document: None,
            loaded_path: None,
        }
    }

    /// Build a loaded handle from YAML text instead of a file
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LoadError> {
        let document = parse_document("<inline>", Path::new("<inline>"), yaml)?;
        Ok(Self {
            search_path: SearchPath::new(crate::search_path::DEFAULT_SEARCH_PATH),
            document: Some(document),
            loaded_path: None,
        })
    }

    /// Re-resolve the search path from its environment variable.
    /// The loaded document is kept.
    pub fn initialize(&mut self) {
        self.search_path.resolve();
    }

    /// Directory the next load will search
    pub fn search_path(&self) -> &Path {
        self.search_path.dir()
    }

    /// Load `<name>.yaml` (or `.yml`) from the search path, replacing the
    /// current document. On failure the current document is kept.
    pub fn load_config(&mut self, name: &str) -> Result<(), LoadError> {
        if name.is_empty() {
            return Err(LoadError::EmptyName);
        }

        let path = self
            .search_path
            .candidates(name)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
                search_path: self.search_path.dir().to_path_buf(),
            })?;

        let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;
        let document = parse_document(name, &path, &content)?;

        log::debug!(
            "Loaded config '{}' from {} ({} top-level keys)",
            name,
            path.display(),
            document.len()
        );
        self.document = Some(document);
        self.loaded_path = Some(path);
        Ok(())
    }

    /// Whether any document has been loaded
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// File the current document was read from
    pub fn loaded_path(&self) -> Option<&Path> {
        self.loaded_path.as_deref()
    }

    /// Top-level keys of the loaded document
    pub fn keys(&self) -> Vec<&str> {
        self.document
            .as_ref()
            .map(|doc| doc.keys().collect())
            .unwrap_or_default()
    }

    /// Raw value stored at `key`
    pub fn get(&self, key: &str) -> Result<&ConfigValue, LookupError> {
        let key = ConfigKey::parse(key).inspect_err(|e| log::debug!("{}", e))?;
        self.document
            .as_ref()
            .and_then(|doc| doc.lookup(&key))
            .ok_or_else(|| {
                let err = key.not_found();
                log::debug!("{}", err);
                err
            })
    }

    /// Get the value at `key` as a string
    pub fn get_string(&self, key: &str) -> Result<String, LookupError> {
        self.get_typed(key, "string", ConfigValue::try_string)
    }

    /// Get the value at `key` as a signed integer
    pub fn get_int(&self, key: &str) -> Result<i64, LookupError> {
        self.get_typed(key, "int", ConfigValue::try_int)
    }

    /// Get the value at `key` as an unsigned integer.
    /// Negative values fail with a type mismatch
    pub fn get_uint(&self, key: &str) -> Result<u64, LookupError> {
        self.get_typed(key, "uint", ConfigValue::try_uint)
    }

    /// Get the value at `key` as a boolean
    pub fn get_bool(&self, key: &str) -> Result<bool, LookupError> {
        self.get_typed(key, "bool", ConfigValue::try_bool)
    }

    /// Deserialize the value or sub-tree at `key`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, LookupError> {
        let value = self.get(key)?;
        serde_yaml::to_value(value)
            .and_then(serde_yaml::from_value)
            .map_err(|e| LookupError::Deserialize {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn get_typed<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl Fn(&ConfigValue) -> Option<T>,
    ) -> Result<T, LookupError> {
        let value = self.get(key)?;
        convert(value).ok_or_else(|| {
            let err = LookupError::TypeMismatch {
                key: key.to_string(),
                expected,
                actual: value.to_string(),
            };
            log::debug!("{}", err);
            err
        })
    }
}

impl Default for YamlConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_document(name: &str, path: &Path, content: &str) -> Result<Document, LoadError> {
    Document::parse(content).map_err(|e| match e {
        DocumentError::Yaml(source) => LoadError::Parse {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        },
        DocumentError::Invalid(message) => LoadError::InvalidDocument {
            name: name.to_string(),
            message,
        },
    })
}

//! Resolution of the directory holding the YAML files

use std::path::{Path, PathBuf};

/// Environment variable consulted by [`SearchPath::from_env`]
pub const DEFAULT_ENV_VAR: &str = "YAMLCFG_PATH";

/// Directory used when the environment variable is unset
pub const DEFAULT_SEARCH_PATH: &str = ".";

/// Extensions probed, in order, for a configuration name
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Directory scanned for named configuration files.
///
/// The directory is not checked for existence here; a missing directory
/// surfaces as a load error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dir: PathBuf,
    /// Variable the directory was resolved from, if any
    env_var: Option<String>,
}

impl SearchPath {
    /// Resolve from [`DEFAULT_ENV_VAR`]
    pub fn from_env() -> Self {
        Self::from_env_var(DEFAULT_ENV_VAR)
    }

    /// Resolve from a custom environment variable
    pub fn from_env_var(name: impl Into<String>) -> Self {
        let name = name.into();
        let dir = read_env_dir(&name);
        Self {
            dir,
            env_var: Some(name),
        }
    }

    /// Pin an explicit directory, ignoring the environment
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            env_var: None,
        }
    }

    /// Re-read the environment variable. Pinned paths are left unchanged.
    pub fn resolve(&mut self) {
        if let Some(name) = &self.env_var {
            self.dir = read_env_dir(name);
        }
    }

    /// Directory currently searched
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Variable the directory is read from, `None` when pinned
    pub fn env_var(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    /// Files probed for `name`, in order
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = YAML_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", name, ext)))
            .collect();

        let has_yaml_ext = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| YAML_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if has_yaml_ext {
            paths.push(self.dir.join(name));
        }

        paths
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::from_env()
    }
}

fn read_env_dir(name: &str) -> PathBuf {
    match std::env::var(name) {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            log::debug!(
                "{} not usable ({}), searching {}",
                name,
                e,
                DEFAULT_SEARCH_PATH
            );
            PathBuf::from(DEFAULT_SEARCH_PATH)
        }
    }
}

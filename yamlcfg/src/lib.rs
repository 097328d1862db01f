//! Typed access to named YAML configuration files
//!
//! The directory holding the files comes from an environment variable
//! (`YAMLCFG_PATH` unless another is chosen), defaulting to the current
//! directory. A [`YamlConfig`] handle loads one document at a time and
//! answers string, integer and unsigned integer lookups, including
//! dot-separated keys into nested mappings.
//!
//! ```no_run
//! use yamlcfg::YamlConfig;
//!
//! # fn main() -> yamlcfg::ConfigResult<()> {
//! let mut config = YamlConfig::new();
//! config.load_config("app")?;
//! let city = config.get_string("location.city")?;
//! let retries = config.get_uint("retries")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod key;
pub mod loader;
pub mod search_path;
pub mod value;

// Re-export main types
pub use error::{ConfigError, ConfigResult, DocumentError, LoadError, LookupError};
pub use key::ConfigKey;
pub use loader::YamlConfig;
pub use search_path::{SearchPath, DEFAULT_ENV_VAR, DEFAULT_SEARCH_PATH};
pub use value::{ConfigValue, Document};

//! Integration tests for yamlcfg

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use temp_env::{with_var, with_var_unset};
use yamlcfg::*;

const KEY_STR: &str = "testStr";
const KEY_STR_ALT: &str = "testStrAlt";
const KEY_UINT: &str = "testUint";
const KEY_INT: &str = "testInt";
const KEY_NESTED: &str = "location.Country/City";

const WANT_STR: &str = "Hello World!";
const WANT_STR_ALT: &str = "Alternative";
const WANT_UINT: u64 = 12345;
const WANT_INT: i64 = -67890;
const WANT_NESTED: &str = "Germany/Heidelberg";

fn sample_yaml() -> String {
    format!(
        "{KEY_STR}: {WANT_STR}\n\
         {KEY_STR_ALT}: {WANT_STR_ALT}\n\
         {KEY_UINT}: {WANT_UINT}\n\
         {KEY_INT}: {WANT_INT}\n\
         location:\n    Country/City: {WANT_NESTED}\n    city: Heidelberg\n"
    )
}

fn write_yaml(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

/// Temp dir holding `app.yaml` and a handle already loaded from it
fn loaded() -> (TempDir, YamlConfig) {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "app.yaml", &sample_yaml());
    let mut config = YamlConfig::with_search_path(dir.path());
    config.load_config("app").unwrap();
    (dir, config)
}

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}

#[test]
fn test_search_path_from_env() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "app.yaml", &sample_yaml());

    with_var(DEFAULT_ENV_VAR, Some(dir.path()), || {
        let mut config = YamlConfig::new();
        assert_eq!(config.search_path(), dir.path());
        config.load_config("app").unwrap();
        assert_eq!(config.get_string(KEY_STR).unwrap(), WANT_STR);
    });
}

#[test]
fn test_search_path_defaults_to_current_dir() {
    with_var_unset(DEFAULT_ENV_VAR, || {
        let config = YamlConfig::new();
        assert_eq!(config.search_path(), Path::new(DEFAULT_SEARCH_PATH));
    });
}

#[test]
fn test_initialize_rereads_env() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_yaml(first.path(), "app.yaml", "origin: first\n");
    write_yaml(second.path(), "app.yaml", "origin: second\n");

    let mut config = with_var("YAMLCFG_IT_REINIT", Some(first.path()), || {
        YamlConfig::from_env_var("YAMLCFG_IT_REINIT")
    });
    config.load_config("app").unwrap();
    assert_eq!(config.get_string("origin").unwrap(), "first");

    with_var("YAMLCFG_IT_REINIT", Some(second.path()), || config.initialize());
    assert_eq!(config.search_path(), second.path());
    // Still the old document until the next load
    assert_eq!(config.get_string("origin").unwrap(), "first");

    config.load_config("app").unwrap();
    assert_eq!(config.get_string("origin").unwrap(), "second");
}

#[test]
fn test_get_string() {
    let (_dir, config) = loaded();
    assert_eq!(config.get_string(KEY_STR).unwrap(), WANT_STR);
    assert_eq!(config.get_string(KEY_STR_ALT).unwrap(), WANT_STR_ALT);
}

#[test]
fn test_get_uint() {
    let (_dir, config) = loaded();
    assert_eq!(config.get_uint(KEY_UINT).unwrap(), WANT_UINT);
}

#[test]
fn test_get_int_preserves_sign() {
    let (_dir, config) = loaded();
    assert_eq!(config.get_int(KEY_INT).unwrap(), WANT_INT);
    assert!(config.get_uint(KEY_INT).unwrap_err().is_type_mismatch());
}

#[test]
fn test_get_nested() {
    let (_dir, config) = loaded();
    assert_eq!(config.get_string(KEY_NESTED).unwrap(), WANT_NESTED);
    assert_eq!(config.get_string("location.city").unwrap(), "Heidelberg");
}

#[test]
fn test_invalid_keys_not_found() {
    let (_dir, config) = loaded();

    let key = reversed(KEY_STR);
    assert_eq!(config.get_string(&key), Err(LookupError::NotFound(key.clone())));

    let key = reversed(KEY_INT);
    assert!(config.get_int(&key).unwrap_err().is_not_found());

    let key = reversed(KEY_UINT);
    assert!(config.get_uint(&key).unwrap_err().is_not_found());
}

#[test]
fn test_empty_key() {
    let (_dir, config) = loaded();
    assert_eq!(config.get_string(""), Err(LookupError::EmptyKey));
    assert_eq!(config.get_int(""), Err(LookupError::EmptyKey));
    assert_eq!(config.get_uint(""), Err(LookupError::EmptyKey));
}

#[test]
fn test_deleted_file_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = write_yaml(dir.path(), "gone.yaml", &sample_yaml());
    let mut config = YamlConfig::with_search_path(dir.path());
    fs::remove_file(&path).unwrap();

    let err = config.load_config("gone").unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert_eq!(err.config_name(), Some("gone"));
    assert!(!config.is_loaded());
}

#[test]
fn test_missing_directory_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let mut config = YamlConfig::with_search_path(dir.path().join("missing"));
    assert!(matches!(
        config.load_config("app"),
        Err(LoadError::NotFound { .. })
    ));
}

#[test]
fn test_unparsable_file() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "broken.yaml", "key: [unclosed\n");
    let mut config = YamlConfig::with_search_path(dir.path());

    let err = config.load_config("broken").unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("broken"));
}

#[test]
fn test_non_utf8_file_fails_to_read() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.yaml"), [0xff, 0xfe, b'a']).unwrap();
    let mut config = YamlConfig::with_search_path(dir.path());

    let err = config.load_config("bad").unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert_eq!(err.config_name(), Some("bad"));
    assert!(!config.is_loaded());
}

#[test]
fn test_non_scalar_mapping_key_is_invalid() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "complex.yaml", "? [a, b]\n: x\n");
    let mut config = YamlConfig::with_search_path(dir.path());

    let err = config.load_config("complex").unwrap_err();
    assert!(matches!(err, LoadError::InvalidDocument { .. }));
    assert_eq!(err.config_name(), Some("complex"));
    assert!(err.to_string().contains("unsupported mapping key"));
}

#[test]
fn test_failed_load_keeps_previous_document() {
    let (dir, mut config) = loaded();
    write_yaml(dir.path(), "broken.yaml", "key: [unclosed\n");

    assert!(config.load_config("broken").is_err());
    assert_eq!(config.get_string(KEY_STR).unwrap(), WANT_STR);
    assert_eq!(config.loaded_path(), Some(dir.path().join("app.yaml").as_path()));
}

#[test]
fn test_reload_replaces_document() {
    let (dir, mut config) = loaded();
    write_yaml(dir.path(), "other.yaml", "onlyOther: 1\n");

    config.load_config("other").unwrap();
    assert_eq!(config.get_int("onlyOther").unwrap(), 1);
    assert!(config.get_string(KEY_STR).unwrap_err().is_not_found());
}

#[test]
fn test_yml_extension_and_explicit_extension() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "short.yml", "ext: yml\n");
    write_yaml(dir.path(), "full.yaml", "ext: yaml\n");
    let mut config = YamlConfig::with_search_path(dir.path());

    config.load_config("short").unwrap();
    assert_eq!(config.get_string("ext").unwrap(), "yml");

    config.load_config("full.yaml").unwrap();
    assert_eq!(config.get_string("ext").unwrap(), "yaml");
}

#[test]
fn test_yaml_preferred_over_yml() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "both.yml", "ext: yml\n");
    write_yaml(dir.path(), "both.yaml", "ext: yaml\n");
    let mut config = YamlConfig::with_search_path(dir.path());

    config.load_config("both").unwrap();
    assert_eq!(config.get_string("ext").unwrap(), "yaml");
}

#[test]
fn test_empty_file_loads_empty_document() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "empty.yaml", "");
    let mut config = YamlConfig::with_search_path(dir.path());

    config.load_config("empty").unwrap();
    assert!(config.is_loaded());
    assert!(config.keys().is_empty());
    assert!(config.get_string(KEY_STR).unwrap_err().is_not_found());
}

#[test]
fn test_errors_convert_into_config_error() {
    fn read_city(dir: &Path) -> ConfigResult<String> {
        let mut config = YamlConfig::with_search_path(dir);
        config.load_config("app")?;
        Ok(config.get_string("location.city")?)
    }

    let (dir, _config) = loaded();
    assert_eq!(read_city(dir.path()).unwrap(), "Heidelberg");

    let empty = TempDir::new().unwrap();
    assert!(matches!(
        read_city(empty.path()),
        Err(ConfigError::Load(LoadError::NotFound { .. }))
    ));
}

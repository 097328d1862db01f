//! Simple configuration demo
//!
//! Writes a YAML file to a temporary directory, points `YAMLCFG_PATH` at it
//! and reads a few typed values back. Run with `RUST_LOG=debug` to see the
//! library's log output.

use std::fs;
use tempfile::TempDir;
use yamlcfg::{ConfigResult, YamlConfig, DEFAULT_ENV_VAR};

fn main() -> ConfigResult<()> {
    env_logger::init();

    let temp_dir = match TempDir::new() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to create temp directory: {}", e);
            std::process::exit(1);
        }
    };

    let config_content = r#"
service:
  name: demo
  port: 8080
retries: 3
offset: -15
"#;
    if let Err(e) = fs::write(temp_dir.path().join("demo.yaml"), config_content) {
        eprintln!("Failed to write demo.yaml: {}", e);
        std::process::exit(1);
    }

    std::env::set_var(DEFAULT_ENV_VAR, temp_dir.path());
    let mut config = YamlConfig::new();
    config.load_config("demo")?;

    println!("Loaded {:?}", config.loaded_path());
    println!("   service.name: {}", config.get_string("service.name")?);
    println!("   service.port: {}", config.get_uint("service.port")?);
    println!("   retries: {}", config.get_uint("retries")?);
    println!("   offset: {}", config.get_int("offset")?);

    match config.get_uint("offset") {
        Ok(v) => println!("   offset as uint: {}", v),
        Err(e) => println!("   offset as uint: {}", e),
    }

    Ok(())
}

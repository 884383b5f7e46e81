//! Integration tests for swagforge-config

use std::env;
use std::io::Write;
use swagforge_config::*;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_merge_toml_file() {
    let file = write_temp(
        ".toml",
        r#"
host = "petstore.example.com"
base_path = "/api"
schemes = "https"
filename = "petstore.json"
tag_naming = "snake"
"#,
    );

    let mut config = GeneratorConfig::default();
    config.merge_file(file.path()).unwrap();

    assert_eq!(config.host.as_deref(), Some("petstore.example.com"));
    assert_eq!(config.base_path.as_deref(), Some("/api"));
    assert_eq!(config.schemes.as_deref(), Some("https"));
    assert_eq!(config.filename, "petstore.json");
    assert_eq!(config.tag_naming, "snake");
}

#[test]
fn test_merge_json_file() {
    let file = write_temp(".json", r#"{"pack": "Response", "schemes": ["http", "ws"]}"#);

    let mut config = GeneratorConfig::default();
    config.merge_file(file.path()).unwrap();

    assert_eq!(config.pack.as_deref(), Some("Response"));
    assert_eq!(config.schemes.as_deref(), Some("http,ws"));
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".yaml", "host: x");
    let mut config = GeneratorConfig::default();
    assert!(matches!(
        config.merge_file(file.path()),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_environment_overrides_file() {
    let file = write_temp(".json", r#"{"host": "from-file.example.com"}"#);

    unsafe {
        env::set_var("SWAGFORGE_HOST", "from-env.example.com");
    }

    let config = GeneratorConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.host.as_deref(), Some("from-env.example.com"));

    unsafe {
        env::remove_var("SWAGFORGE_HOST");
    }
}

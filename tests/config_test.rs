// tests/config_test.rs
use catalog_publish::config::{load_config, Config, CONFIG_ENV_VAR};
use catalog_publish::PublishError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
#[serial]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[catalog]
product_slug = "pivotal-gpdb"
public_availability = "Selected User Groups Only"

[resolver]
search_path = "build/artifacts"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.catalog.public_availability, "Selected User Groups Only");
    assert_eq!(config.resolver.search_path, PathBuf::from("build/artifacts"));
    assert_eq!(config.upload.object_prefix, "");
}

#[test]
#[serial]
fn test_load_fixture() {
    let config = load_config(Some("tests/fixtures/catalog-publish.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.catalog.product_slug, "vmware-greenplum");
    assert_eq!(config.catalog.history_file, Some(PathBuf::from("releases.json")));
    assert_eq!(config.resolver.search_path, PathBuf::from("/srv/artifacts"));
    assert_eq!(config.upload.object_key("gp.zip"), "product-files/gpdb6/gp.zip");
}

#[test]
#[serial]
fn test_config_from_environment() {
    env::set_var(CONFIG_ENV_VAR, "tests/fixtures/catalog-publish.toml");
    let config = load_config(None);
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().catalog.product_slug, "vmware-greenplum");
}

#[test]
#[serial]
fn test_explicit_path_wins_over_environment() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[catalog]\nproduct_slug = \"from-flag\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    env::set_var(CONFIG_ENV_VAR, "tests/fixtures/catalog-publish.toml");
    let config = load_config(Some(temp_file.path().to_str().unwrap()));
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().catalog.product_slug, "from-flag");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    let err = load_config(Some("tests/fixtures/does-not-exist.toml")).unwrap_err();
    assert!(matches!(err, PublishError::Config(_)));
    assert!(err.to_string().contains("does-not-exist.toml"));
}

#[test]
#[serial]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[catalog\nproduct_slug = 1").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, PublishError::Config(_)));
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.catalog.product_slug, "pivotal-gpdb");
    assert_eq!(config.catalog.public_availability, "All Users");
    assert_eq!(config.resolver.search_path, PathBuf::from("."));
}

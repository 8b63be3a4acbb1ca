use crate::catalog::history::DEFAULT_PUBLIC_AVAILABILITY;
use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "CATALOG_PUBLISH_CONFIG";

/// Configuration file looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "catalog-publish.toml";

/// Configuration file looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".catalog-publish.toml";

/// Represents the complete configuration for catalog-publish.
///
/// Loaded once at startup and passed down to the release pipeline.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub upload: UploadConfig,
}

fn default_product_slug() -> String {
    "pivotal-gpdb".to_string()
}

fn default_public_availability() -> String {
    DEFAULT_PUBLIC_AVAILABILITY.to_string()
}

fn default_search_path() -> PathBuf {
    PathBuf::from(".")
}

/// Distribution catalog settings.
///
/// `history_file` points at a JSON export of the product's published releases;
/// without it no sibling release can be found.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_product_slug")]
    pub product_slug: String,

    #[serde(default)]
    pub history_file: Option<PathBuf>,

    #[serde(default = "default_public_availability")]
    pub public_availability: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            product_slug: default_product_slug(),
            history_file: None,
            public_availability: default_public_availability(),
        }
    }
}

/// Where declared product files are looked up.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResolverConfig {
    #[serde(default = "default_search_path")]
    pub search_path: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            search_path: default_search_path(),
        }
    }
}

/// Object storage layout of uploaded files.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct UploadConfig {
    #[serde(default)]
    pub object_prefix: String,
}

impl UploadConfig {
    /// Object key of an uploaded file: `<object_prefix>/<file name>`
    pub fn object_key(&self, file_name: &str) -> String {
        let prefix = self.object_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", prefix, file_name)
        }
    }
}

fn config_candidates(config_path: Option<&str>) -> Vec<PathBuf> {
    if let Some(path) = config_path {
        return vec![PathBuf::from(path)];
    }
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return vec![PathBuf::from(path)];
        }
    }

    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(USER_CONFIG_FILE));
    }
    candidates
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path named by `CATALOG_PUBLISH_CONFIG`
/// 3. `catalog-publish.toml` in current directory
/// 4. `.catalog-publish.toml` in user config directory
/// 5. Default configuration if no file found
///
/// An explicitly named file (1 or 2) must exist.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let explicit = config_path.is_some()
        || env::var(CONFIG_ENV_VAR).map(|p| !p.trim().is_empty()).unwrap_or(false);

    for candidate in config_candidates(config_path) {
        if explicit || candidate.exists() {
            return load_config_file(&candidate);
        }
    }

    debug!("no configuration file found, using defaults");
    Ok(Config::default())
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        PublishError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| PublishError::config(format!("Invalid {}: {}", path.display(), e)))?;
    debug!("loaded configuration from {}", path.display());
    Ok(config)
}

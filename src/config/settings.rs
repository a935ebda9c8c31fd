//! Application configuration loading from config.toml
//!
//! Every table and field is optional; a missing file is only an error when the
//! path was given explicitly through `PASTRY_CONFIG`.

use crate::config::{api::ApiConfig, editor::EditorConfig};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "PASTRY_CONFIG";
/// Config file used when `PASTRY_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection
    pub api: ApiConfig,
    /// Editor defaults
    pub editor: EditorConfig,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the application configuration and applies environment overrides.
///
/// Reads the file named by `PASTRY_CONFIG`, or `config.toml` if it exists, or
/// falls back to built-in defaults.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => load_config(path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        Err(_) => {
            info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            AppConfig::default()
        }
    };
    config.api = config.api.with_env_overrides();
    info!(
        "Using backend at {} (timeout {}s)",
        config.api.base_url, config.api.timeout_secs
    );
    Ok(config)
}

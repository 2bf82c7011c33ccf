//! Runtime settings for the console.
//!
//! Layered the usual way: built-in defaults, then an optional
//! `config/settings.toml`, then `CATALOG_ADMIN_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the catalog REST API, without a trailing slash.
    pub api_base_url: String,
    /// Path to the form field schema file.
    pub schema_path: String,
    /// Log level for the console, `error` through `trace`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            schema_path: "schema.json".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/settings").required(false))
            .add_source(Environment::with_prefix("CATALOG_ADMIN"))
            .build()?
            .try_deserialize()
    }
}

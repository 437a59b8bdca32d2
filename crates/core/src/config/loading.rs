//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `LESSONSEARCH_` and use double
    /// underscores for nested values. For example:
    /// - `LESSONSEARCH_UPSTREAM__BASE_URL=https://records.example.com`
    /// - `LESSONSEARCH_SEARCH__MODE=fuzzy`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // Set scalar defaults explicitly (config crate doesn't apply serde
        // defaults for keys overridden from the environment alone)
        let builder = set_config_default(builder, "upstream.base_url", default_base_url())?;
        let builder = set_config_default(builder, "upstream.records_path", default_records_path())?;
        let builder = set_config_default(
            builder,
            "upstream.request_timeout_secs",
            default_request_timeout_secs() as i64,
        )?;
        let builder =
            set_config_default(builder, "upstream.max_pages", default_max_pages() as i64)?;
        let builder = set_config_default(builder, "server.host", default_server_host())?;
        let mut builder =
            set_config_default(builder, "server.port", default_server_port() as i64)?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with LESSONSEARCH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("LESSONSEARCH")
                .separator("__")
                .try_parsing(true),
        );

        // Support backward-compatible environment variables for the upstream
        if let Ok(base_url) = std::env::var("UPSTREAM_BASE_URL") {
            builder = builder
                .set_override("upstream.base_url", base_url)
                .map_err(|e| Error::config(format!("Failed to set UPSTREAM_BASE_URL: {e}")))?;
        }
        if let Ok(token) = std::env::var("UPSTREAM_API_TOKEN") {
            builder = builder
                .set_override("upstream.api_token", token)
                .map_err(|e| Error::config(format!("Failed to set UPSTREAM_API_TOKEN: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.lessonsearch/config.toml or custom --config path)
    /// 3. Environment variables (LESSONSEARCH_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}

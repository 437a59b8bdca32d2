//! Configuration module for the lessonsearch system
//!
//! This module provides configuration structures and loading mechanisms for
//! the lessonsearch system. Configuration can be loaded from TOML files
//! and/or environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.lessonsearch/config.toml` and contains
/// user preferences that apply across installations.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".lessonsearch").join("config.toml"))
}

/// Credential header convention used when calling the upstream API
///
/// Two conventions are observed in the wild: a standard `Authorization:
/// Bearer <token>` header and a bare `token: <token>` header. The aggregator
/// tries the configured schemes in order when the upstream rejects one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// Raw `token: <token>` header
    Token,
}

/// Keyword matching strategy for the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Substring match; a record matches if any keyword appears
    Any,
    /// Substring match; a record matches only if every keyword appears
    All,
    /// Fuzzy-ranked search with scored, capped results
    Fuzzy,
}

/// Main configuration structure for the lessonsearch system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream record API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Query matching configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the upstream record-keeping API
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the paginated records endpoint
    #[serde(default = "default_records_path")]
    pub records_path: String,

    /// Credential header conventions to try, in order
    #[serde(default = "default_credential_schemes")]
    pub credential_schemes: Vec<CredentialScheme>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on pages fetched in one aggregation pass
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Fallback token used when a request carries no credentials
    /// (or use the UPSTREAM_API_TOKEN env var)
    pub api_token: Option<String>,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("records_path", &self.records_path)
            .field("credential_schemes", &self.credential_schemes)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_pages", &self.max_pages)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            records_path: default_records_path(),
            credential_schemes: default_credential_schemes(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
            api_token: None,
        }
    }
}

/// Configuration for query tokenization and matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Matching strategy: "any" (default), "all", "fuzzy"
    #[serde(default = "default_match_mode")]
    pub mode: MatchMode,

    /// Words removed from queries before matching
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Minimum keyword length kept by the tokenizer
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    /// Minimum average fuzzy score (0-100) a record must exceed
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Maximum number of fuzzy results returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Match against every string found in a record instead of the
    /// designated text fields only
    #[serde(default)]
    pub deep_projection: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: default_match_mode(),
            stopwords: default_stopwords(),
            min_keyword_len: default_min_keyword_len(),
            fuzzy_threshold: default_fuzzy_threshold(),
            max_results: default_max_results(),
            deep_projection: false,
        }
    }
}

/// Configuration for the REST API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the server binds to
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Port the server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// CORS origins; empty disables CORS, "*" allows all
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

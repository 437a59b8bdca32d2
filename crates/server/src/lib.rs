//! REST API server for lessonsearch
//!
//! This crate serves the caller-facing HTTP surface: the static welcome
//! payload, the aggregated record collection, and natural language search
//! over it. All record data is pulled per-request from the configured
//! upstream API; nothing persists across requests.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod api;
mod rest_server;

// Re-export error types from core
pub use lessonsearch_core::error::{Error, Result};

/// Run the REST API server with the given configuration.
///
/// This is the only public function in this crate. It:
/// 1. Creates the upstream HTTP transport and record aggregator
/// 2. Builds the tokenizer and match configuration
/// 3. Binds the configured address and serves the API until shutdown
///
/// # Arguments
///
/// * `config` - Application configuration with upstream, search, and server
///   settings
///
/// # Returns
///
/// Returns `Ok(())` on clean shutdown, or an error if startup fails.
pub async fn run_server(config: lessonsearch_core::config::Config) -> Result<()> {
    rest_server::run_server_impl(config).await
}

//! Core types for the lessonsearch record aggregation and search system
//!
//! This crate provides the foundational abstractions used throughout the
//! lessonsearch system, including:
//!
//! - **Records**: open-ended lesson-learnt entries from the upstream API
//! - **Configuration**: system configuration management
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod record;

// Re-export main types for convenience
pub use config::{Config, CredentialScheme, MatchMode, SearchConfig, ServerConfig, UpstreamConfig};
pub use error::{Error, Result, ResultExt};
pub use record::Record;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

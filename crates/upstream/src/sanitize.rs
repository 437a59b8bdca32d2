//! Markup sanitization for free-text record fields
//!
//! Upstream records carry rich-text fields that sometimes arrive with
//! HTML-style markup embedded. Matching operates on plain text, so tag-like
//! runs are stripped on ingest.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// Compile-time constant pattern, so we use infallible initialization
static TAG_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Strips tag-like markup from text and trims surrounding whitespace
///
/// Text without markup passes through with only the trim applied. The
/// operation is idempotent.
pub fn clean_text(text: &str) -> String {
    let stripped = match &*TAG_PATTERN {
        Some(pattern) => pattern.replace_all(text, ""),
        None => text.into(),
    };
    stripped.trim().to_string()
}

/// Cleans a JSON value in place when it is textual
///
/// Non-string values are left untouched; absence of text is never an error.
pub fn clean_value(value: &mut Value) {
    if let Value::String(text) = value {
        *text = clean_text(text);
    }
}

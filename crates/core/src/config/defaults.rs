//! Default values and functions for configuration

use super::{CredentialScheme, MatchMode};

// Default constants
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub(crate) const DEFAULT_RECORDS_PATH: &str = "/api/v1/Transactions";
pub(crate) const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_records_path() -> String {
    DEFAULT_RECORDS_PATH.to_string()
}

pub(crate) fn default_credential_schemes() -> Vec<CredentialScheme> {
    vec![CredentialScheme::Bearer]
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    20
}

pub(crate) fn default_max_pages() -> u32 {
    1000
}

pub(crate) fn default_match_mode() -> MatchMode {
    MatchMode::Any
}

// Domain terms plus generic fillers; anything here carries no search signal
// for lesson-learnt queries.
pub(crate) fn default_stopwords() -> Vec<String> {
    [
        "show",
        "me",
        "all",
        "tell",
        "the",
        "lessons",
        "learnt",
        "lesson",
        "about",
        "in",
        "for",
        "of",
        "and",
        "risk",
        "risks",
        "issue",
        "issues",
        "mitigant",
        "mitigants",
        "project",
        "projects",
        "sector",
        "sectors",
        "portfolio",
        "portfolios",
        "what",
        "which",
        "with",
        "that",
        "give",
        "find",
        "search",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn default_min_keyword_len() -> usize {
    3
}

pub(crate) fn default_fuzzy_threshold() -> f64 {
    60.0
}

pub(crate) fn default_max_results() -> usize {
    20
}

pub(crate) fn default_server_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

pub(crate) fn default_server_port() -> u16 {
    8095
}

pub(crate) fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

//! Request and response models for API operations

use lessonsearch_core::record::{self, Record};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Static welcome payload served at the root endpoint
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WelcomeResponse {
    pub title: String,
    pub intro: String,
    pub examples: Vec<String>,
}

impl WelcomeResponse {
    /// The payload served to every caller of the root endpoint
    pub fn payload() -> Self {
        Self {
            title: "Lesson Learnt Search".to_string(),
            intro: "Search lessons learnt by typing natural queries like \
                    'Show me lessons learnt in the construction sector'."
                .to_string(),
            examples: vec![
                "/api/v1/search?query=lessons+learnt+in+construction+sector".to_string(),
                "/api/v1/search?query=delays+in+energy+projects".to_string(),
                "/api/v1/records".to_string(),
            ],
        }
    }
}

/// Query parameters accepted by the search endpoint
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct SearchParams {
    /// Natural language query, e.g. "lessons learnt in construction sector"
    pub query: String,
}

/// The fully-aggregated record collection
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RecordsResponse {
    pub total: usize,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub records: Vec<Record>,
}

/// Search results; the shape follows the configured match mode
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Substring(SubstringSearchResponse),
    Fuzzy(FuzzySearchResponse),
}

/// Results of a substring (ANY/ALL) search
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubstringSearchResponse {
    pub query: String,
    pub keywords: Vec<String>,
    pub total_matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub results: Vec<Record>,
}

/// Results of a fuzzy-ranked search
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FuzzySearchResponse {
    pub query: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<ScoredRecord>,
}

/// Flat summary of one ranked record
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScoredRecord {
    pub title: String,
    pub lesson: String,
    pub risk_type: String,
    pub transaction: String,
    pub portfolio: String,
    pub sector: String,
    pub score: f64,
}

impl ScoredRecord {
    /// Builds the summary from a record and its relevance score
    ///
    /// Scores are rounded to two decimals for presentation.
    pub fn from_scored(rec: &Record, score: f64) -> Self {
        Self {
            title: rec.text(record::FIELD_TITLE).to_string(),
            lesson: rec.text(record::FIELD_LESSON).to_string(),
            risk_type: rec.text(record::FIELD_TYPE).to_string(),
            transaction: rec.transaction_text(record::FIELD_TRANSACTION_NAME),
            portfolio: rec.transaction_text(record::FIELD_PORTFOLIO_NAME),
            sector: rec.transaction_text(record::FIELD_SECTOR),
            score: (score * 100.0).round() / 100.0,
        }
    }
}

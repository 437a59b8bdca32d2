//! Natural language search service
//!
//! Tokenizes the caller's query, aggregates the upstream collection, and
//! runs the configured matching strategy over it.

use crate::api::models::{
    FuzzySearchResponse, ScoredRecord, SearchResponse, SubstringSearchResponse,
};
use lessonsearch_core::config::SearchConfig;
use lessonsearch_core::error::{Error, Result};
use lessonsearch_search::{match_records, MatchOutcome, QueryTokenizer};
use lessonsearch_upstream::RecordAggregator;

/// Runs one search pass and shapes the response for the configured mode
pub async fn search_records(
    aggregator: &RecordAggregator,
    tokenizer: &QueryTokenizer,
    config: &SearchConfig,
    token: &str,
    query: &str,
) -> Result<SearchResponse> {
    let keywords = tokenizer.tokenize(query);
    if keywords.is_empty() {
        return Err(Error::invalid_query(format!(
            "no usable search terms in '{query}'"
        )));
    }

    let records = aggregator.fetch_all(token).await.map_err(Error::from)?;
    if records.is_empty() {
        return Err(Error::empty_result("no records found from the upstream API"));
    }

    let outcome = match_records(records, &keywords, config);

    Ok(match outcome {
        MatchOutcome::Filtered(matched) => {
            let message = matched
                .is_empty()
                .then(|| format!("No matching lessons found for '{query}'"));
            SearchResponse::Substring(SubstringSearchResponse {
                query: query.to_string(),
                keywords,
                total_matches: matched.len(),
                message,
                results: matched,
            })
        }
        MatchOutcome::Ranked(ranked) => {
            let results: Vec<ScoredRecord> = ranked
                .iter()
                .map(|(rec, score)| ScoredRecord::from_scored(rec, *score))
                .collect();
            let message = results
                .is_empty()
                .then(|| format!("No matching lessons found for '{query}'"));
            SearchResponse::Fuzzy(FuzzySearchResponse {
                query: query.to_string(),
                count: results.len(),
                message,
                results,
            })
        }
    })
}

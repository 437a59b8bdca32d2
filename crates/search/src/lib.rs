//! Query tokenization and record matching for lessonsearch
//!
//! This crate turns a free-text query into a keyword list and decides which
//! records are relevant to it, using one of two interchangeable strategies:
//!
//! - **Substring**: keyword containment over a flattened text projection of
//!   each record, under an ANY-of or ALL-of policy
//! - **Fuzzy**: per-keyword partial-similarity scoring, averaged, producing
//!   a ranked and capped result set
//!

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod fuzzy;
mod projection;
mod substring;
mod tokenizer;

pub use fuzzy::{partial_similarity, rank_records};
pub use projection::{project, project_deep, project_fields};
pub use substring::filter_records;
pub use tokenizer::QueryTokenizer;

use lessonsearch_core::config::{MatchMode, SearchConfig};
use lessonsearch_core::Record;

/// Result of one matching pass over a record collection
#[derive(Debug)]
pub enum MatchOutcome {
    /// Records that passed the substring filter, in collection order
    Filtered(Vec<Record>),
    /// Records ranked by descending fuzzy score, capped to the result limit
    Ranked(Vec<(Record, f64)>),
}

/// Runs the configured matching strategy over a collection
///
/// An empty keyword list is rejected upstream by the tokenizer contract; an
/// empty collection yields an empty outcome, not an error.
pub fn match_records(
    records: Vec<Record>,
    keywords: &[String],
    config: &SearchConfig,
) -> MatchOutcome {
    tracing::debug!(
        "Matching {} records against {} keywords in {:?} mode",
        records.len(),
        keywords.len(),
        config.mode
    );
    match config.mode {
        MatchMode::Any => MatchOutcome::Filtered(filter_records(
            records,
            keywords,
            false,
            config.deep_projection,
        )),
        MatchMode::All => MatchOutcome::Filtered(filter_records(
            records,
            keywords,
            true,
            config.deep_projection,
        )),
        MatchMode::Fuzzy => MatchOutcome::Ranked(rank_records(
            records,
            keywords,
            config.fuzzy_threshold,
            config.max_results,
            config.deep_projection,
        )),
    }
}

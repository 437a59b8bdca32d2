//! Fuzzy-ranked record scoring
//!
//! Each keyword is scored 0-100 against the record's projection: an exact
//! substring scores 100, otherwise the score is the best normalized
//! Levenshtein similarity of any projection window of the keyword's length.
//! Per-record scores are the average over all keywords; records above the
//! threshold are returned ranked, capped to the result limit.

use crate::projection::project;
use lessonsearch_core::Record;

/// Scores and ranks a collection against the keywords
///
/// Only records whose average score strictly exceeds `threshold` are kept.
/// The sort is stable, so equal scores keep collection order; at most
/// `max_results` records are returned.
pub fn rank_records(
    records: Vec<Record>,
    keywords: &[String],
    threshold: f64,
    max_results: usize,
    deep: bool,
) -> Vec<(Record, f64)> {
    let mut scored: Vec<(Record, f64)> = records
        .into_iter()
        .filter_map(|rec| {
            let projection = project(&rec, deep);
            let score = average_score(keywords, &projection);
            (score > threshold).then_some((rec, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(max_results);
    scored
}

fn average_score(keywords: &[String], projection: &str) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let total: f64 = keywords
        .iter()
        .map(|keyword| partial_similarity(keyword, projection))
        .sum();
    total / keywords.len() as f64
}

/// Similarity of `needle` against the closest same-length window of
/// `haystack`, as a 0-100 score
///
/// An exact substring short-circuits at 100. Either side empty scores 0.
pub fn partial_similarity(needle: &str, haystack: &str) -> f64 {
    if needle.is_empty() || haystack.is_empty() {
        return 0.0;
    }
    if haystack.contains(needle) {
        return 100.0;
    }

    let hay: Vec<char> = haystack.chars().collect();
    let needle_len = needle.chars().count();
    if hay.len() <= needle_len {
        return strsim::normalized_levenshtein(needle, haystack) * 100.0;
    }

    let mut best: f64 = 0.0;
    for window in hay.windows(needle_len) {
        let candidate: String = window.iter().collect();
        let score = strsim::normalized_levenshtein(needle, &candidate) * 100.0;
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

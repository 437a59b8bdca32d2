//! Substring keyword filtering over record projections

use crate::projection::project;
use lessonsearch_core::Record;

/// Filters a collection down to the records whose projection contains the
/// keywords, preserving collection order
///
/// With `require_all` false (the ANY policy) one matching keyword suffices;
/// with it true (the ALL policy) every keyword must appear. Keywords are
/// expected lowercase, as the tokenizer produces them.
pub fn filter_records(
    records: Vec<Record>,
    keywords: &[String],
    require_all: bool,
    deep: bool,
) -> Vec<Record> {
    records
        .into_iter()
        .filter(|rec| matches_projection(&project(rec, deep), keywords, require_all))
        .collect()
}

fn matches_projection(projection: &str, keywords: &[String], require_all: bool) -> bool {
    if keywords.is_empty() {
        return false;
    }
    if require_all {
        keywords.iter().all(|k| projection.contains(k.as_str()))
    } else {
        keywords.iter().any(|k| projection.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records() -> Vec<Record> {
        [
            json!({ "title": "Energy project A" }),
            json!({ "title": "Water project B" }),
        ]
        .into_iter()
        .filter_map(Record::from_value)
        .collect()
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_any_policy_matches_single_keyword() {
        let matched = filter_records(records(), &kw(&["energy"]), false, false);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].text("title"), "Energy project A");
    }

    #[test]
    fn test_any_policy_needs_only_one_of_many() {
        let matched = filter_records(records(), &kw(&["energy", "nonexistent"]), false, false);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_all_policy_requires_every_keyword() {
        let matched = filter_records(records(), &kw(&["energy", "project"]), true, false);
        assert_eq!(matched.len(), 1);

        let matched = filter_records(records(), &kw(&["energy", "water"]), true, false);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_empty_keywords_match_nothing() {
        assert!(filter_records(records(), &[], false, false).is_empty());
        assert!(filter_records(records(), &[], true, false).is_empty());
    }

    #[test]
    fn test_deep_projection_reaches_undesignated_fields() {
        let rec = Record::from_value(json!({ "auditTrail": { "reviewer": "margaret" } }))
            .expect("object");

        assert!(filter_records(vec![rec.clone()], &kw(&["margaret"]), false, false).is_empty());
        assert_eq!(
            filter_records(vec![rec], &kw(&["margaret"]), false, true).len(),
            1
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let matched = filter_records(records(), &kw(&["project"]), false, false);
        assert_eq!(matched[0].text("title"), "Energy project A");
        assert_eq!(matched[1].text("title"), "Water project B");
    }
}

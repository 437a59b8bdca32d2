//! Text projection of records into a flat matching surface

use lessonsearch_core::record::{self, Record};
use serde_json::Value;

/// Recursion bound for the permissive whole-record walk
const MAX_WALK_DEPTH: usize = 16;

/// Lowercase concatenation of the designated text fields
///
/// This is the default matching surface: title, details, lesson narrative,
/// type description, and the nested transaction name/portfolio/sector.
pub fn project_fields(rec: &Record) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(
        record::TEXT_FIELDS.len() + record::TRANSACTION_TEXT_FIELDS.len(),
    );
    for field in record::TEXT_FIELDS {
        parts.push(rec.text(field).to_string());
    }
    for field in record::TRANSACTION_TEXT_FIELDS {
        parts.push(rec.transaction_text(field));
    }
    parts.join(" ").to_lowercase()
}

/// Lowercase concatenation of every string leaf in the record
///
/// The permissive variant: matches against text anywhere in the structure,
/// not just the designated fields. The walk is depth-bounded.
pub fn project_deep(rec: &Record) -> String {
    let mut leaves = Vec::new();
    for value in rec.0.values() {
        collect_string_leaves(value, 0, &mut leaves);
    }
    leaves.join(" ").to_lowercase()
}

/// Projects a record using the configured surface
pub fn project(rec: &Record, deep: bool) -> String {
    if deep {
        project_deep(rec)
    } else {
        project_fields(rec)
    }
}

fn collect_string_leaves(value: &Value, depth: usize, out: &mut Vec<String>) {
    if depth > MAX_WALK_DEPTH {
        return;
    }
    match value {
        Value::String(text) => out.push(text.clone()),
        Value::Array(items) => {
            for item in items {
                collect_string_leaves(item, depth + 1, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_string_leaves(item, depth + 1, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).expect("test value must be an object")
    }

    #[test]
    fn test_project_fields_joins_designated_fields() {
        let rec = record(json!({
            "title": "Energy Project A",
            "lessonLearnt": "Engage early",
            "consultantTransaction": { "sector": "Energy", "portfolioName": "Infra" }
        }));
        let projection = project_fields(&rec);
        assert!(projection.contains("energy project a"));
        assert!(projection.contains("engage early"));
        assert!(projection.contains("infra"));
    }

    #[test]
    fn test_project_fields_ignores_undesignated_fields() {
        let rec = record(json!({ "internalNote": "Confidential" }));
        assert!(!project_fields(&rec).contains("confidential"));
    }

    #[test]
    fn test_project_deep_collects_every_string_leaf() {
        let rec = record(json!({
            "internalNote": "Confidential",
            "attachments": [{ "name": "survey.pdf" }]
        }));
        let projection = project_deep(&rec);
        assert!(projection.contains("confidential"));
        assert!(projection.contains("survey.pdf"));
    }

    #[test]
    fn test_project_deep_renders_no_scalars() {
        let rec = record(json!({ "count": 12, "active": true }));
        assert_eq!(project_deep(&rec), "");
    }
}

//! Shape-tolerant extraction of record lists from upstream page bodies
//!
//! The upstream response shape varies release-to-release: the record list
//! shows up bare, under `data`, under `data.result`/`results`/`items`, or
//! under a top-level collection key, with the page count keyed as
//! `totalPages` or `total_pages` when present at all. Each known shape is a
//! recognizer tried in priority order; a bounded depth-first scan covers
//! anything new the upstream ships next.

use lessonsearch_core::Record;
use serde_json::{Map, Value};

/// Keys that may nest the record list inside a wrapper object
const LIST_KEYS: [&str; 3] = ["result", "results", "items"];

/// Keys that may carry the page count
const PAGE_COUNT_KEYS: [&str; 2] = ["totalPages", "total_pages"];

/// Recursion bound for the fallback scan over arbitrarily nested bodies
const MAX_SCAN_DEPTH: usize = 16;

/// Extracted page content: the records found and the claimed page count
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    /// Record objects recovered from the body, in body order
    pub records: Vec<Record>,
    /// Page count claimed by the body; 1 when the shape carries none
    pub total_pages: u32,
}

impl ExtractedPage {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            total_pages: 1,
        }
    }
}

type ShapeRecognizer = fn(&Value) -> Option<ExtractedPage>;

// Priority order matters: wrapper shapes before the generic scan, so a page
// count is recovered whenever the body carries one.
const SHAPE_RECOGNIZERS: [ShapeRecognizer; 5] = [
    shape_bare_list,
    shape_data_list,
    shape_data_wrapper,
    shape_top_level_list,
    shape_nested_scan,
];

/// Locates the record list and page count within one decoded page body
///
/// Never fails: a body in which no recognizer finds records yields an empty
/// page with a count of 1, which the aggregator treats as end of data.
pub fn extract_page(body: &Value) -> ExtractedPage {
    for recognize in SHAPE_RECOGNIZERS {
        if let Some(page) = recognize(body) {
            if !page.records.is_empty() {
                return page;
            }
        }
    }
    ExtractedPage::empty()
}

/// Shape 1: the body is itself the record list
fn shape_bare_list(body: &Value) -> Option<ExtractedPage> {
    let items = body.as_array()?;
    Some(ExtractedPage {
        records: records_from_items(items),
        total_pages: 1,
    })
}

/// Shape 2: the record list sits directly under `data`
fn shape_data_list(body: &Value) -> Option<ExtractedPage> {
    let map = body.as_object()?;
    let items = map.get("data")?.as_array()?;
    Some(ExtractedPage {
        records: records_from_items(items),
        total_pages: page_count(map).unwrap_or(1),
    })
}

/// Shape 3: `data` is a wrapper object holding the list under a known key
fn shape_data_wrapper(body: &Value) -> Option<ExtractedPage> {
    let wrapper = body.as_object()?.get("data")?.as_object()?;
    let items = LIST_KEYS.iter().find_map(|key| wrapper.get(*key))?;
    Some(ExtractedPage {
        records: items
            .as_array()
            .map(|list| records_from_items(list))
            .unwrap_or_default(),
        total_pages: page_count(wrapper).unwrap_or(1),
    })
}

/// Shape 4: the list sits under a top-level collection key
fn shape_top_level_list(body: &Value) -> Option<ExtractedPage> {
    let map = body.as_object()?;
    let items = ["results", "items", "data"]
        .iter()
        .find_map(|key| map.get(*key)?.as_array())?;
    Some(ExtractedPage {
        records: records_from_items(items),
        total_pages: page_count(map).unwrap_or(1),
    })
}

/// Shape 5: depth-first scan for the first list made entirely of objects
fn shape_nested_scan(body: &Value) -> Option<ExtractedPage> {
    find_record_list(body, 0).map(|records| ExtractedPage {
        records,
        total_pages: 1,
    })
}

fn find_record_list(value: &Value, depth: usize) -> Option<Vec<Record>> {
    if depth > MAX_SCAN_DEPTH {
        return None;
    }
    match value {
        Value::Array(items) => {
            if !items.is_empty() && items.iter().all(Value::is_object) {
                return Some(records_from_items(items));
            }
            items.iter().find_map(|v| find_record_list(v, depth + 1))
        }
        Value::Object(map) => map.values().find_map(|v| find_record_list(v, depth + 1)),
        _ => None,
    }
}

fn records_from_items(items: &[Value]) -> Vec<Record> {
    items
        .iter()
        .filter_map(|item| Record::from_value(item.clone()))
        .collect()
}

fn page_count(map: &Map<String, Value>) -> Option<u32> {
    PAGE_COUNT_KEYS
        .iter()
        .find_map(|key| map.get(*key))
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn titles(page: &ExtractedPage) -> Vec<&str> {
        page.records.iter().map(|r| r.text("title")).collect()
    }

    #[test]
    fn test_extracts_bare_list() {
        let body = json!([{ "title": "a" }, { "title": "b" }]);
        let page = extract_page(&body);
        assert_eq!(titles(&page), vec!["a", "b"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_extracts_data_list() {
        let body = json!({ "data": [{ "title": "a" }], "totalPages": 4 });
        let page = extract_page(&body);
        assert_eq!(titles(&page), vec!["a"]);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_extracts_data_result_wrapper() {
        let body = json!({
            "data": { "result": [{ "title": "a" }, { "title": "b" }], "totalPages": 3 }
        });
        let page = extract_page(&body);
        assert_eq!(titles(&page), vec!["a", "b"]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_extracts_data_results_wrapper_snake_case_count() {
        let body = json!({
            "data": { "results": [{ "title": "a" }], "total_pages": 2 }
        });
        let page = extract_page(&body);
        assert_eq!(titles(&page), vec!["a"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_extracts_top_level_items() {
        let body = json!({ "items": [{ "title": "a" }], "total_pages": 5 });
        let page = extract_page(&body);
        assert_eq!(titles(&page), vec!["a"]);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn test_falls_back_to_nested_scan() {
        let body = json!({
            "meta": { "generated": true },
            "payload": { "inner": { "entries": [{ "title": "deep" }] } }
        });
        let page = extract_page(&body);
        assert_eq!(titles(&page), vec!["deep"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_unrecognized_body_is_empty_not_an_error() {
        for body in [json!(null), json!("text"), json!({ "data": 12 }), json!([1, 2, 3])] {
            let page = extract_page(&body);
            assert!(page.records.is_empty());
            assert_eq!(page.total_pages, 1);
        }
    }

    #[test]
    fn test_scan_depth_is_bounded() {
        let mut body = json!([{ "title": "too deep" }]);
        for _ in 0..(MAX_SCAN_DEPTH + 2) {
            body = json!({ "wrap": body });
        }
        let page = extract_page(&body);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_wrapper_shape_wins_over_scan_for_page_count() {
        // The scan would find the same list but lose the page count.
        let body = json!({
            "data": { "result": [{ "title": "a" }], "totalPages": 7 }
        });
        assert_eq!(extract_page(&body).total_pages, 7);
    }
}

//! Page-by-page aggregation of upstream records
//!
//! Drives the page transport from page 1 until the claimed page count is
//! exhausted, an empty page signals the real end of data, or a transport
//! fault truncates the pass. Partial results are considered useful: only an
//! authorization rejection on every configured credential scheme surfaces as
//! an error.

use crate::error::UpstreamError;
use crate::extract::extract_page;
use crate::sanitize::clean_value;
use crate::transport::PageTransport;
use lessonsearch_core::config::{CredentialScheme, UpstreamConfig};
use lessonsearch_core::record::{self, Record};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Aggregates paginated upstream records into one in-memory collection
pub struct RecordAggregator {
    transport: Arc<dyn PageTransport>,
    schemes: Vec<CredentialScheme>,
    max_pages: u32,
}

impl RecordAggregator {
    /// Create an aggregator over the given transport and upstream settings
    pub fn new(transport: Arc<dyn PageTransport>, config: &UpstreamConfig) -> Self {
        let schemes = if config.credential_schemes.is_empty() {
            vec![CredentialScheme::Bearer]
        } else {
            config.credential_schemes.clone()
        };
        Self {
            transport,
            schemes,
            max_pages: config.max_pages.max(1),
        }
    }

    /// Fetches every available page and returns the merged, sanitized
    /// collection in page-arrival order
    ///
    /// Pagination metadata is learned from the responses: the claimed page
    /// count never drops below the page already being read, and a page with
    /// zero records ends the pass regardless of what the count claims.
    /// Transport faults after a successful page truncate the result instead
    /// of failing it. Duplicates across pages are preserved as delivered.
    pub async fn fetch_all(&self, token: &str) -> Result<Vec<Record>, UpstreamError> {
        let mut collection = Vec::new();
        let mut page: u32 = 1;
        let mut total_pages: u32 = 1;
        let mut pages_fetched: u32 = 0;
        let mut scheme_idx = 0;

        while page <= total_pages && page <= self.max_pages {
            let body = match self.fetch_with_schemes(page, token, &mut scheme_idx).await {
                Ok(body) => body,
                Err(err) if err.is_unauthorized() => return Err(err),
                Err(err) => {
                    warn!(
                        "Aggregation stopped at page {page}: {err}; returning {} records",
                        collection.len()
                    );
                    return Ok(collection);
                }
            };
            pages_fetched += 1;

            let extracted = extract_page(&body);
            total_pages = extracted.total_pages.max(page);

            if extracted.records.is_empty() {
                debug!("Page {page} yielded no records; treating as end of data");
                break;
            }

            for mut rec in extracted.records {
                sanitize_record(&mut rec);
                collection.push(rec);
            }
            page += 1;
        }

        info!(
            "Aggregated {} records across {pages_fetched} pages",
            collection.len()
        );
        Ok(collection)
    }

    /// Fetches one page, rotating through the credential schemes on 401
    ///
    /// A scheme that succeeds becomes the starting scheme for later pages.
    /// Every scheme rejected means the token itself is bad and the rejection
    /// propagates.
    async fn fetch_with_schemes(
        &self,
        page: u32,
        token: &str,
        scheme_idx: &mut usize,
    ) -> Result<Value, UpstreamError> {
        let mut last_rejection = None;

        for offset in 0..self.schemes.len() {
            let idx = (*scheme_idx + offset) % self.schemes.len();
            let scheme = self.schemes[idx];
            match self.transport.fetch_page(page, token, scheme).await {
                Ok(body) => {
                    *scheme_idx = idx;
                    return Ok(body);
                }
                Err(err) if err.is_unauthorized() => {
                    warn!("Upstream rejected {scheme:?} credentials for page {page}");
                    last_rejection = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_rejection.unwrap_or_else(|| {
            UpstreamError::Unauthorized("no credential scheme accepted".to_string())
        }))
    }
}

/// Cleans the designated free-text fields of a record in place
///
/// All other fields pass through unchanged.
fn sanitize_record(rec: &mut Record) {
    for field in record::TEXT_FIELDS {
        if let Some(value) = rec.0.get_mut(field) {
            clean_value(value);
        }
    }
    if let Some(Value::Object(tx)) = rec.0.get_mut(record::FIELD_TRANSACTION) {
        for field in record::TRANSACTION_TEXT_FIELDS {
            if let Some(value) = tx.get_mut(field) {
                clean_value(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_transport::MockPageTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config_with_schemes(schemes: Vec<CredentialScheme>) -> UpstreamConfig {
        UpstreamConfig {
            credential_schemes: schemes,
            ..UpstreamConfig::default()
        }
    }

    fn aggregator(script: Vec<crate::mock_transport::ScriptedPage>) -> (RecordAggregator, Arc<MockPageTransport>) {
        let transport = Arc::new(MockPageTransport::new(script));
        let agg = RecordAggregator::new(
            transport.clone(),
            &config_with_schemes(vec![CredentialScheme::Bearer]),
        );
        (agg, transport)
    }

    fn titles(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.text("title")).collect()
    }

    #[tokio::test]
    async fn test_single_page_aggregation() {
        let (agg, transport) = aggregator(vec![Ok(json!({
            "data": { "result": [{ "title": "a" }, { "title": "b" }] }
        }))]);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(titles(&records), vec!["a", "b"]);
        assert_eq!(transport.calls(), vec![(1, CredentialScheme::Bearer)]);
    }

    #[tokio::test]
    async fn test_multi_page_aggregation_follows_page_count() {
        let (agg, transport) = aggregator(vec![
            Ok(json!({ "data": { "result": [{ "title": "a" }], "totalPages": 2 } })),
            Ok(json!({ "data": { "result": [{ "title": "b" }], "totalPages": 2 } })),
        ]);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(titles(&records), vec!["a", "b"]);
        assert_eq!(
            transport.calls(),
            vec![(1, CredentialScheme::Bearer), (2, CredentialScheme::Bearer)]
        );
    }

    #[tokio::test]
    async fn test_empty_page_ends_pass_despite_claimed_count() {
        let (agg, transport) = aggregator(vec![
            Ok(json!({ "data": { "result": [{ "title": "a" }], "totalPages": 5 } })),
            Ok(json!({ "data": { "result": [], "totalPages": 5 } })),
        ]);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(titles(&records), vec!["a"]);
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_on_later_page_returns_partial_results() {
        let (agg, _) = aggregator(vec![
            Ok(json!({ "data": { "result": [{ "title": "a" }, { "title": "b" }], "totalPages": 2 } })),
            Err(UpstreamError::Timeout("page 2 request timed out".to_string())),
        ]);

        let records = agg.fetch_all("tok").await.expect("partial results are not an error");
        assert_eq!(titles(&records), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_malformed_later_page_returns_partial_results() {
        let (agg, _) = aggregator(vec![
            Ok(json!({ "data": { "result": [{ "title": "a" }], "totalPages": 3 } })),
            Err(UpstreamError::MalformedBody("not json".to_string())),
        ]);

        let records = agg.fetch_all("tok").await.expect("partial results are not an error");
        assert_eq!(titles(&records), vec!["a"]);
    }

    #[tokio::test]
    async fn test_unauthorized_propagates_with_single_scheme() {
        let (agg, transport) = aggregator(vec![Err(UpstreamError::Unauthorized(
            "bad token".to_string(),
        ))]);

        let err = agg.fetch_all("tok").await.expect_err("must reject");
        assert!(err.is_unauthorized());
        assert_eq!(transport.calls(), vec![(1, CredentialScheme::Bearer)]);
    }

    #[tokio::test]
    async fn test_alternate_scheme_tried_once_then_fails() {
        let transport = Arc::new(MockPageTransport::new(vec![
            Err(UpstreamError::Unauthorized("bearer rejected".to_string())),
            Err(UpstreamError::Unauthorized("token rejected".to_string())),
        ]));
        let agg = RecordAggregator::new(
            transport.clone(),
            &config_with_schemes(vec![CredentialScheme::Bearer, CredentialScheme::Token]),
        );

        let err = agg.fetch_all("tok").await.expect_err("must reject");
        assert!(err.is_unauthorized());
        assert_eq!(
            transport.calls(),
            vec![(1, CredentialScheme::Bearer), (1, CredentialScheme::Token)]
        );
    }

    #[tokio::test]
    async fn test_working_scheme_is_kept_for_later_pages() {
        let transport = Arc::new(MockPageTransport::new(vec![
            Err(UpstreamError::Unauthorized("bearer rejected".to_string())),
            Ok(json!({ "data": { "result": [{ "title": "a" }], "totalPages": 2 } })),
            Ok(json!({ "data": { "result": [{ "title": "b" }], "totalPages": 2 } })),
        ]));
        let agg = RecordAggregator::new(
            transport.clone(),
            &config_with_schemes(vec![CredentialScheme::Bearer, CredentialScheme::Token]),
        );

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(titles(&records), vec!["a", "b"]);
        assert_eq!(
            transport.calls(),
            vec![
                (1, CredentialScheme::Bearer),
                (1, CredentialScheme::Token),
                (2, CredentialScheme::Token),
            ]
        );
    }

    #[tokio::test]
    async fn test_claimed_count_never_drops_below_current_page() {
        // Page 2 claims fewer pages than already read; the pass still ends
        // cleanly after it rather than looping or panicking.
        let (agg, transport) = aggregator(vec![
            Ok(json!({ "data": { "result": [{ "title": "a" }], "totalPages": 3 } })),
            Ok(json!({ "data": { "result": [{ "title": "b" }], "totalPages": 1 } })),
        ]);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(titles(&records), vec!["a", "b"]);
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_designated_fields_are_sanitized() {
        let (agg, _) = aggregator(vec![Ok(json!({
            "data": { "result": [{
                "title": " <b>Energy</b> project ",
                "details": "<p>Grid upgrade</p>",
                "reference": "<keep-me>",
                "consultantTransaction": {
                    "transactionName": "<i>Harbor</i>",
                    "sector": "Energy"
                }
            }] }
        }))]);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        let rec = &records[0];
        assert_eq!(rec.text("title"), "Energy project");
        assert_eq!(rec.text("details"), "Grid upgrade");
        assert_eq!(rec.transaction_text("transactionName"), "Harbor");
        // Only the designated text fields are rewritten.
        assert_eq!(rec.text("reference"), "<keep-me>");
    }

    #[tokio::test]
    async fn test_duplicates_across_pages_are_preserved() {
        let (agg, _) = aggregator(vec![
            Ok(json!({ "data": { "result": [{ "title": "same" }], "totalPages": 2 } })),
            Ok(json!({ "data": { "result": [{ "title": "same" }], "totalPages": 2 } })),
        ]);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(titles(&records), vec!["same", "same"]);
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_an_error() {
        let (agg, _) = aggregator(vec![Ok(json!({ "data": { "result": [] } }))]);
        let records = agg.fetch_all("tok").await.expect("empty is a normal outcome");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_page_cap_bounds_inconsistent_upstreams() {
        // An upstream that always claims one more page than read must not be
        // followed forever.
        let script: Vec<_> = (0..5)
            .map(|i| {
                Ok(json!({
                    "data": { "result": [{ "title": format!("r{i}") }], "totalPages": 100 }
                }))
            })
            .collect();
        let transport = Arc::new(MockPageTransport::new(script));
        let config = UpstreamConfig {
            max_pages: 3,
            ..UpstreamConfig::default()
        };
        let agg = RecordAggregator::new(transport.clone(), &config);

        let records = agg.fetch_all("tok").await.expect("must aggregate");
        assert_eq!(records.len(), 3);
        assert_eq!(transport.calls().len(), 3);
    }
}

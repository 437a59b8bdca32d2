//! Record listing service

use crate::api::models::RecordsResponse;
use lessonsearch_core::error::{Error, Result};
use lessonsearch_upstream::RecordAggregator;

/// Aggregates every upstream page into one response
///
/// An empty collection is surfaced as a client-visible not-found condition;
/// upstream auth rejections propagate as authorization failures.
pub async fn get_records(aggregator: &RecordAggregator, token: &str) -> Result<RecordsResponse> {
    let records = aggregator.fetch_all(token).await.map_err(Error::from)?;

    if records.is_empty() {
        return Err(Error::empty_result("no records found from the upstream API"));
    }

    Ok(RecordsResponse {
        total: records.len(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonsearch_core::config::UpstreamConfig;
    use lessonsearch_upstream::{MockPageTransport, ScriptedPage, UpstreamError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn aggregator(script: Vec<ScriptedPage>) -> RecordAggregator {
        RecordAggregator::new(
            Arc::new(MockPageTransport::new(script)),
            &UpstreamConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_get_records_returns_collection() {
        let agg = aggregator(vec![Ok(json!({
            "data": { "result": [{ "title": "a" }, { "title": "b" }] }
        }))]);

        let response = get_records(&agg, "tok").await.expect("must aggregate");
        assert_eq!(response.total, 2);
        assert_eq!(response.records.len(), 2);
    }

    #[tokio::test]
    async fn test_get_records_empty_is_not_found() {
        let agg = aggregator(vec![Ok(json!({ "data": { "result": [] } }))]);

        let err = get_records(&agg, "tok").await.expect_err("must be empty");
        assert!(matches!(err, Error::EmptyResult(_)));
    }

    #[tokio::test]
    async fn test_get_records_propagates_unauthorized() {
        let agg = aggregator(vec![Err(UpstreamError::Unauthorized("expired".to_string()))]);

        let err = get_records(&agg, "tok").await.expect_err("must reject");
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}

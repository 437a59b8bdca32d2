//! Mock page transport for testing

use crate::error::UpstreamError;
use crate::transport::PageTransport;
use async_trait::async_trait;
use lessonsearch_core::config::CredentialScheme;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted outcome of one page fetch
pub type ScriptedPage = Result<Value, UpstreamError>;

/// Mock transport that replays scripted page responses
///
/// Responses are consumed in call order; calls past the end of the script
/// fail as transport faults. Every call is recorded so tests can assert on
/// the page/scheme sequence the aggregator produced.
pub struct MockPageTransport {
    script: Mutex<VecDeque<ScriptedPage>>,
    calls: Mutex<Vec<(u32, CredentialScheme)>>,
}

impl MockPageTransport {
    /// Create a mock transport replaying the given responses in order
    pub fn new(script: Vec<ScriptedPage>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The `(page, scheme)` pairs fetched so far, in call order
    pub fn calls(&self) -> Vec<(u32, CredentialScheme)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageTransport for MockPageTransport {
    async fn fetch_page(
        &self,
        page: u32,
        _token: &str,
        scheme: CredentialScheme,
    ) -> Result<Value, UpstreamError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((page, scheme));
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| {
                Err(UpstreamError::Transport(format!(
                    "mock transport has no scripted response for page {page}"
                )))
            })
    }
}

//! Upstream record aggregation for lessonsearch
//!
//! This crate pulls paginated lesson-learnt records from the upstream
//! record-keeping API into one sanitized in-memory collection. It tolerates
//! the response-shape drift the upstream ships release-to-release, retries
//! across credential-header conventions, and degrades gracefully when a page
//! fetch fails mid-pass.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod aggregator;
pub mod error;
mod extract;
mod mock_transport;
mod sanitize;
mod transport;

pub use aggregator::RecordAggregator;
pub use error::UpstreamError;
pub use extract::{extract_page, ExtractedPage};
pub use mock_transport::{MockPageTransport, ScriptedPage};
pub use sanitize::{clean_text, clean_value};
pub use transport::{HttpPageTransport, PageTransport};

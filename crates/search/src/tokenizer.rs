//! Query tokenization with stopword removal
//!
//! Callers phrase searches as natural language ("Show me all the lessons
//! learnt in the construction sector"). The tokenizer keeps only the words
//! that carry search signal: lowercased word runs that are neither stopwords
//! nor too short.

use lessonsearch_core::config::SearchConfig;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Compile-time constant pattern, so we use infallible initialization
static WORD_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\w+").ok());

/// Turns free-text queries into normalized keyword lists
pub struct QueryTokenizer {
    stopwords: HashSet<String>,
    min_keyword_len: usize,
}

impl QueryTokenizer {
    /// Build a tokenizer from the search configuration
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            stopwords: config.stopwords.iter().map(|s| s.to_lowercase()).collect(),
            min_keyword_len: config.min_keyword_len,
        }
    }

    /// Extracts keywords from a query, preserving query order
    ///
    /// An empty result means the query had no usable search terms; callers
    /// surface that as a bad request rather than matching everything.
    pub fn tokenize(&self, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        let Some(pattern) = &*WORD_PATTERN else {
            return Vec::new();
        };
        pattern
            .find_iter(&query)
            .map(|m| m.as_str().to_string())
            .filter(|word| word.chars().count() >= self.min_keyword_len)
            .filter(|word| !self.stopwords.contains(word))
            .collect()
    }
}

//! Record model for lesson-learnt entries
//!
//! A record is an open-ended field mapping decoded from the upstream API.
//! No field is guaranteed present; accessors treat absent or non-textual
//! fields as empty text rather than errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record title field
pub const FIELD_TITLE: &str = "title";
/// Free-text details field
pub const FIELD_DETAILS: &str = "details";
/// The lesson-learnt narrative field
pub const FIELD_LESSON: &str = "lessonLearnt";
/// Risk type description field
pub const FIELD_TYPE: &str = "typeDescription";
/// Nested object carrying transaction metadata
pub const FIELD_TRANSACTION: &str = "consultantTransaction";
/// Transaction name within the nested transaction object
pub const FIELD_TRANSACTION_NAME: &str = "transactionName";
/// Portfolio name within the nested transaction object
pub const FIELD_PORTFOLIO_NAME: &str = "portfolioName";
/// Sector within the nested transaction object
pub const FIELD_SECTOR: &str = "sector";

/// Top-level free-text fields sanitized on ingest and used for matching
pub const TEXT_FIELDS: [&str; 4] = [FIELD_TITLE, FIELD_DETAILS, FIELD_LESSON, FIELD_TYPE];

/// Fields of the nested transaction object sanitized and used for matching
pub const TRANSACTION_TEXT_FIELDS: [&str; 3] =
    [FIELD_TRANSACTION_NAME, FIELD_PORTFOLIO_NAME, FIELD_SECTOR];

/// One lesson-learnt entry returned by the upstream API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw field lookup
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Text content of a top-level field; empty when absent or non-textual
    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// Text content of a field of the nested transaction object
    ///
    /// Non-string scalars are rendered to text, since sectors and portfolio
    /// codes arrive as numbers in some upstream releases.
    pub fn transaction_text(&self, field: &str) -> String {
        self.0
            .get(FIELD_TRANSACTION)
            .and_then(Value::as_object)
            .and_then(|tx| tx.get(field))
            .map(value_to_text)
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Renders a scalar JSON value as text; null, arrays and objects render empty
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

//! Data rows and pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record: column name to scalar value.
pub type Row = Map<String, Value>;

/// One batch of rows handed to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPage {
    /// Rows in backend order.
    pub rows: Vec<Row>,
    /// Continuation token. Absent or empty means no more data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_record: Option<String>,
}

impl DataPage {
    /// Creates a final page holding all rows.
    pub fn complete(rows: Vec<Row>) -> Self {
        Self {
            rows,
            last_record: None,
        }
    }

    /// Creates a page followed by more data.
    pub fn with_continuation(rows: Vec<Row>, last_record: impl Into<String>) -> Self {
        Self {
            rows,
            last_record: Some(last_record.into()),
        }
    }

    /// Returns the token to pass verbatim as `lastRecord` on the next call,
    /// or `None` if this is the final page.
    pub fn next_token(&self) -> Option<&str> {
        self.last_record.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns true if no further page should be requested.
    pub fn is_final(&self) -> bool {
        self.next_token().is_none()
    }

    /// Number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the page carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

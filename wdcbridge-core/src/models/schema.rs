//! Column schema.
//!
//! Descriptors are passed to the host exactly as the backend returns them.
//! [`validate_schema`] exists for hosts that want to check the
//! incremental-refresh invariant themselves; the connector never calls it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::CoreError;

/// Scalar type of a column.
///
/// Names the backend sends that are not listed here survive as
/// [`ColumnType::Other`] and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// Boolean.
    Bool,
    /// Calendar date.
    Date,
    /// Date and time.
    Datetime,
    /// Floating point number.
    Float,
    /// Integer.
    Int,
    /// Text.
    String,
    /// Any other type name, kept verbatim.
    Other(String),
}

impl ColumnType {
    /// Returns the wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Float => "float",
            Self::Int => "int",
            Self::String => "string",
            Self::Other(name) => name,
        }
    }

    /// Returns true if a column of this type can drive incremental refresh.
    pub fn supports_incremental_refresh(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime | Self::Int)
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "bool" => Self::Bool,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "float" => Self::Float,
            "int" => Self::Int,
            "string" => Self::String,
            _ => Self::Other(name),
        }
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a report's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name, also the key used in data rows.
    pub name: String,
    /// Scalar type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Marks the column whose last value resumes an incremental refresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_refresh: Option<bool>,
    /// Any other keys the backend sent (aliases, descriptions).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnDescriptor {
    /// Creates a plain column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            incremental_refresh: None,
            extra: Map::new(),
        }
    }

    /// Marks this column for incremental refresh.
    pub fn incremental(mut self) -> Self {
        self.incremental_refresh = Some(true);
        self
    }

    /// Returns true if this column is marked for incremental refresh.
    pub fn is_incremental(&self) -> bool {
        self.incremental_refresh.unwrap_or(false)
    }
}

/// Checks that at most one column is marked for incremental refresh and
/// that a marked column has a date, datetime, or int type.
pub fn validate_schema(columns: &[ColumnDescriptor]) -> Result<(), CoreError> {
    let marked: Vec<&ColumnDescriptor> = columns.iter().filter(|c| c.is_incremental()).collect();

    if marked.len() > 1 {
        let names: Vec<&str> = marked.iter().map(|c| c.name.as_str()).collect();
        return Err(CoreError::InvalidSchema(format!(
            "multiple incremental refresh columns: {}",
            names.join(", ")
        )));
    }

    if let Some(column) = marked.first() {
        if !column.column_type.supports_incremental_refresh() {
            return Err(CoreError::InvalidSchema(format!(
                "incremental refresh column '{}' has type {}, expected date, datetime, or int",
                column.name, column.column_type
            )));
        }
    }

    Ok(())
}

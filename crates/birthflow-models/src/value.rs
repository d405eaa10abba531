//! Typed field values for record data.
//!
//! Record field values arrive from the data layer as loosely-typed JSON.
//! `FieldValue` gives them a closed shape so criteria evaluation can match
//! exhaustively on the value kind instead of probing dynamic types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single record field value.
///
/// Serializes untagged, so existing JSON documents (`"active"`, `42`,
/// `["a", "b"]`, `null`) round-trip without a wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum FieldValue {
    /// JSON null, and the value of any field missing from the record
    Null,
    /// Boolean flag
    Bool(bool),
    /// Numeric value (integers and floats share one representation)
    Number(f64),
    /// Text value
    Text(String),
    /// Homogeneous or mixed list of values
    List(Vec<FieldValue>),
}

/// Field-name → value map for one record.
pub type FieldValues = HashMap<String, FieldValue>;

impl FieldValue {
    /// Whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The contained text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The contained number, if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Null
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(values: Vec<FieldValue>) -> Self {
        FieldValue::List(values)
    }
}

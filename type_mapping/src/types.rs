//! Parameter value definitions
//!
//! This module provides the native value type bound to
//! positional placeholders and its conversions from Rust types.

use serde::{Deserialize, Serialize};

/// Native value bound to a `$n` placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    BigInt(i64),
    Float(f64),
    Text(String),
    Json(String), // Raw JSON text of an object value
    Array(Vec<SqlValue>),
}

impl SqlValue {
    /// Short type name used in logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "Null",
            SqlValue::Boolean(_) => "Boolean",
            SqlValue::BigInt(_) => "BigInt",
            SqlValue::Float(_) => "Float",
            SqlValue::Text(_) => "Text",
            SqlValue::Json(_) => "Json",
            SqlValue::Array(_) => "Array",
        }
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::BigInt(val as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::BigInt(val)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Float(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Boolean(val)
    }
}

impl<T> From<Vec<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Vec<T>) -> Self {
        SqlValue::Array(val.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

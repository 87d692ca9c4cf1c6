//! JSON conversion utilities
//!
//! This module provides the default conversion from filter JSON
//! values to native parameter values.

use crate::types::SqlValue;
use serde_json::Value;

/// Convert a JSON value into the native value bound to a placeholder
///
/// Numbers become integers when the conversion is lossless and floats
/// otherwise. Objects keep their JSON text, arrays convert element-wise.
pub fn json_to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::BigInt(i)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    SqlValue::BigInt(f as i64)
                } else {
                    SqlValue::Float(f)
                }
            }
        }
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(items) => SqlValue::Array(items.iter().map(json_to_sql_value).collect()),
        Value::Object(_) => SqlValue::Json(value.to_string()),
    }
}

/// Type name of a JSON value, as reported in error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Lenient boolean reading of a JSON value
///
/// Accepts `true`, non-zero numbers and the strings `"1"`, `"t"` and `"true"`
/// (any case); everything else reads as false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "t" | "true"),
        _ => false,
    }
}

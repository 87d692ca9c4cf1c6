//! Parameter binding for sqlx
//!
//! Binds translated parameters onto a Postgres query in placeholder order.

use serde_json::{Number, Value};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::types::Json;
use type_mapping::SqlValue;

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// How an array parameter is sent to Postgres
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayParam {
    Boolean(Vec<bool>),
    BigInt(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
    /// Empty, nested or mixed arrays
    Json(Value),
}

/// Bind every parameter, `$1` first
pub fn bind_params<'q>(query: PgQuery<'q>, params: &[SqlValue]) -> PgQuery<'q> {
    params
        .iter()
        .cloned()
        .fold(query, |query, param| bind_value(query, param))
}

pub fn bind_value(query: PgQuery<'_>, value: SqlValue) -> PgQuery<'_> {
    crate::trace_log!("Binding {} parameter", value.kind());
    match value {
        SqlValue::Null => query.bind(Option::<String>::None),
        SqlValue::Boolean(b) => query.bind(b),
        SqlValue::BigInt(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Json(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(json) => query.bind(Json(json)),
            Err(_) => query.bind(raw),
        },
        SqlValue::Array(items) => match classify_array(items) {
            ArrayParam::Boolean(values) => query.bind(values),
            ArrayParam::BigInt(values) => query.bind(values),
            ArrayParam::Float(values) => query.bind(values),
            ArrayParam::Text(values) => query.bind(values),
            ArrayParam::Json(json) => query.bind(Json(json)),
        },
    }
}

/// Pick a native Postgres array type when all items share one
///
/// Integer and float items together widen to a float array.
pub fn classify_array(items: Vec<SqlValue>) -> ArrayParam {
    if items.is_empty() {
        return ArrayParam::Json(Value::Array(Vec::new()));
    }

    if items.iter().all(|item| matches!(item, SqlValue::Boolean(_))) {
        return ArrayParam::Boolean(
            items
                .into_iter()
                .filter_map(|item| match item {
                    SqlValue::Boolean(b) => Some(b),
                    _ => None,
                })
                .collect(),
        );
    }

    if items.iter().all(|item| matches!(item, SqlValue::BigInt(_))) {
        return ArrayParam::BigInt(
            items
                .into_iter()
                .filter_map(|item| match item {
                    SqlValue::BigInt(i) => Some(i),
                    _ => None,
                })
                .collect(),
        );
    }

    if items
        .iter()
        .all(|item| matches!(item, SqlValue::BigInt(_) | SqlValue::Float(_)))
    {
        return ArrayParam::Float(
            items
                .into_iter()
                .filter_map(|item| match item {
                    SqlValue::BigInt(i) => Some(i as f64),
                    SqlValue::Float(f) => Some(f),
                    _ => None,
                })
                .collect(),
        );
    }

    if items.iter().all(|item| matches!(item, SqlValue::Text(_))) {
        return ArrayParam::Text(
            items
                .into_iter()
                .filter_map(|item| match item {
                    SqlValue::Text(s) => Some(s),
                    _ => None,
                })
                .collect(),
        );
    }

    ArrayParam::Json(Value::Array(items.iter().map(to_json).collect()))
}

/// JSON form of a parameter, used for arrays Postgres cannot type natively
pub fn to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Boolean(b) => Value::Bool(*b),
        SqlValue::BigInt(i) => Value::Number((*i).into()),
        SqlValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        SqlValue::Text(s) => Value::String(s.clone()),
        SqlValue::Json(raw) => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
        }
        SqlValue::Array(items) => Value::Array(items.iter().map(to_json).collect()),
    }
}

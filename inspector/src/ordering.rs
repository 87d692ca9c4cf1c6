//! Sort direction handling

use crate::errors::FilterError;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Parse a direction string, trimmed and case-insensitive
    pub fn parse(direction: &str) -> Result<Self, FilterError> {
        match direction.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(FilterError::InvalidOrderDirection(direction.to_string())),
        }
    }

    /// Parse a direction from a JSON node; non-strings are invalid
    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        match value {
            Value::String(direction) => Self::parse(direction),
            other => Err(FilterError::InvalidOrderDirection(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

//! Error types for filter inspection
//!
//! This module defines every error that can abort a filter translation,
//! whether raised by the inspector itself or by a registered hook.

use thiserror::Error;

/// Filter translation errors
///
/// All variants are terminal: the first error aborts the walk and any hook
/// that already received events must be discarded.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("empty key found in path: {path}")]
    EmptyKey { path: String },

    #[error("invalid filter node: {path}")]
    InvalidFilterNode { path: String },

    #[error("invalid order_by node: {path}")]
    InvalidOrderByNode { path: String },

    #[error("invalid order_by direction: {0}")]
    InvalidOrderDirection(String),

    #[error("empty aggregate function name")]
    EmptyAggregateFunctionName,

    #[error("invalid aggregate node: {0}")]
    InvalidAggregateNode(String),

    #[error("invalid {key} value: {value} (expected a non-negative integer)")]
    InvalidPagination { key: String, value: String },

    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("unsupported logical operator: {0}")]
    UnsupportedLogicalOperator(String),

    #[error("unsupported aggregate function: {0}")]
    UnsupportedAggregateFunction(String),

    #[error("array value expected, got {0}")]
    ArrayValueExpected(String),

    #[error("{function} requires a percentile between 0 and 1, got {value}")]
    InvalidPercentile { function: String, value: String },

    #[error("invalid option for aggregate function {function}: {reason}")]
    InvalidAggregateOption { function: String, reason: String },

    #[error("invalid filter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl FilterError {
    pub fn aggregate_option(function: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAggregateOption {
            function: function.to_string(),
            reason: reason.into(),
        }
    }
}

//! Unified value mapping between filter JSON and SQL parameters
//! This crate provides the conversion logic used across the filterhaus ecosystem

pub mod convert;
pub mod types;

pub use convert::{is_truthy, json_kind, json_to_sql_value};
pub use types::SqlValue;

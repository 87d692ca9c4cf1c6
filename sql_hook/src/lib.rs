//! # SQL Hook
//!
//! Turns filter inspection events into a parameterized SQL query:
//! WHERE conditions with `$n` placeholders, ORDER BY entries, aggregate
//! expressions and LIMIT/OFFSET.
//!
//! ```rust
//! use sql_hook::prelude::*;
//! use std::sync::Arc;
//!
//! let mut hook = SqlParseHook::new(Arc::new(DialectConfig::postgres()));
//! HasuraInspector::new()
//!     .inspect(
//!         r#"{"where": {"user": {"name": {"_ilike": "%ann%"}}}, "order_by": {"id": "desc"}}"#,
//!         &mut [&mut hook],
//!     )
//!     .unwrap();
//!
//! assert_eq!(hook.where_clause(), r#""user"."name" ILIKE $1"#);
//! assert_eq!(hook.order_by_clause(), r#""id" DESC"#);
//! ```

pub(crate) use inspector::{debug_log, trace_log};

pub mod binding;
pub mod dialect;
pub mod prelude;
pub mod query_builder;

pub use binding::{bind_params, bind_value, PgQuery};
pub use dialect::{ColumnNamer, ConvertValueFn, DialectConfig, PostgresAggregateBuilder};
pub use inspector::FilterError;
pub use query_builder::{
    AggregateExpr, AggregateExprBuilder, AggregateRequest, AggregateSet, DefaultAggregateBuilder,
    Pagination, SqlParseHook, SqlQueryBuilder,
};

//! # FilterHaus
//!
//! Translates Hasura-style JSON filters (`where`, `order_by`, `aggregate`,
//! `limit`, `offset`) into parameterized SQL. Dialects are configuration
//! data, and any number of hooks can observe a translation.
//!
//! ## Quick Start
//!
//! ```rust
//! use filterhaus::prelude::*;
//!
//! let haus = FilterHaus::new(DialectConfig::postgres());
//! let (sql, params) = haus.select(
//!     r#"{
//!         "where": {"_and": [{"age": {"_gte": 25}}, {"name": {"_like": "%John%"}}]},
//!         "order_by": {"name": "asc"},
//!         "limit": 10
//!     }"#,
//!     "users",
//!     &[],
//! )?;
//!
//! assert_eq!(
//!     sql,
//!     r#"SELECT * FROM users WHERE ("age" >= $1 AND "name" LIKE $2) ORDER BY "name" ASC LIMIT 10"#
//! );
//! assert_eq!(params, vec![SqlValue::BigInt(25), SqlValue::Text("%John%".to_string())]);
//! # Ok::<(), FilterHausError>(())
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::FilterHaus;
pub use crate::errors::FilterHausError;

// Re-export centralized config
pub use config::{AppConfig, DialectProfile, DialectSettings};

// Re-export internal crates used by the public API
pub use inspector;
pub use sql_hook;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;

//! Convenience re-exports for common FilterHaus usage
//!
//! This prelude module re-exports the most commonly used items from the FilterHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use filterhaus::prelude::*;
//!
//! let builder = FilterHaus::default().translate(r#"{"where": {"id": 7}}"#)?;
//! assert_eq!(builder.where_clause(), r#""id" = $1"#);
//! # Ok::<(), FilterHausError>(())
//! ```

// Core FilterHaus components
pub use crate::core::FilterHaus;
pub use crate::errors::FilterHausError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DialectProfile, DialectSettings};

// Inspection and SQL generation
pub use sql_hook::prelude::*;

// Common external dependencies
pub use sqlx;

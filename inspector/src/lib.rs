//! # Filter Inspector
//!
//! Walks Hasura-style JSON filter documents (`where`, `aggregate`,
//! `order_by`, `limit`, `offset`) and emits a canonical event stream to
//! registered [`FilterHook`]s. The inspector knows nothing about SQL; the
//! `sql-hook` crate turns the events into query fragments.
//!
//! ```rust
//! use inspector::prelude::*;
//!
//! let mut log = EventLog::new();
//! HasuraInspector::new()
//!     .inspect(r#"{"where": {"age": {"_gt": 18}}}"#, &mut [&mut log])
//!     .unwrap();
//!
//! assert_eq!(log.entries()[1], "comparison age _gt 18 []");
//! ```

#[doc(hidden)]
pub use tracing as __tracing;

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!($($arg)*)
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
        $crate::__tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod event;
pub mod hook;
pub mod inspector;
pub mod logging;
pub mod ordering;
pub mod path;
pub mod prelude;

pub use errors::FilterError;
pub use event::{FilterEvent, Section};
pub use hook::FilterHook;
pub use inspector::HasuraInspector;
pub use logging::{EventLog, TracingHook};
pub use ordering::SortOrder;
pub use path::{build_path, dotted_path, parent_path};

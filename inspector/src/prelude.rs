//! Commonly used items for implementing and driving filter hooks

pub use crate::errors::FilterError;
pub use crate::event::{FilterEvent, Section};
pub use crate::hook::FilterHook;
pub use crate::inspector::HasuraInspector;
pub use crate::logging::{EventLog, TracingHook};
pub use crate::ordering::SortOrder;
pub use crate::path::build_path;

//! Inspection event types and definitions
//!
//! This module defines the canonical events emitted while walking
//! a filter document, in depth-first order.

use crate::errors::FilterError;
use crate::hook::FilterHook;
use crate::ordering::SortOrder;
use serde_json::{Map, Value};
use std::fmt;

pub const KEY_WHERE: &str = "where";
pub const KEY_ORDER_BY: &str = "order_by";
pub const KEY_AGGREGATE: &str = "aggregate";
pub const KEY_LIMIT: &str = "limit";
pub const KEY_OFFSET: &str = "offset";

/// Filter section an event originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Where,
    OrderBy,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Where => KEY_WHERE,
            Section::OrderBy => KEY_ORDER_BY,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inspection event
///
/// Events borrow from the filter document and only live for the
/// duration of one notification.
#[derive(Debug, Clone, Copy)]
pub enum FilterEvent<'a> {
    Comparison {
        field: &'a str,
        operator: &'a str,
        value: &'a Value,
        path: &'a [String],
    },
    NestedNodeStart {
        field: &'a str,
        node: &'a Value,
        section: Section,
        path: &'a [String],
    },
    NestedNodeEnd {
        field: &'a str,
        node: &'a Value,
        section: Section,
        path: &'a [String],
    },
    LogicalGroupStart {
        operator: &'a str,
        node: &'a Value,
        path: &'a [String],
    },
    LogicalGroupEnd {
        operator: &'a str,
        node: &'a Value,
        path: &'a [String],
    },
    OrderBy {
        field: &'a str,
        direction: SortOrder,
        path: &'a [String],
    },
    AggregateField {
        function: &'a str,
        field: &'a str,
        options: Option<&'a Map<String, Value>>,
    },
    Limit(u64),
    Offset(u64),
}

impl FilterEvent<'_> {
    /// Deliver this event to the matching hook callback
    pub fn dispatch(&self, hook: &mut dyn FilterHook) -> Result<(), FilterError> {
        match *self {
            FilterEvent::Comparison {
                field,
                operator,
                value,
                path,
            } => hook.on_comparison(field, operator, value, path),
            FilterEvent::NestedNodeStart {
                field,
                node,
                section,
                path,
            } => {
                hook.on_nested_node_start(field, node, section, path);
                Ok(())
            }
            FilterEvent::NestedNodeEnd {
                field,
                node,
                section,
                path,
            } => {
                hook.on_nested_node_end(field, node, section, path);
                Ok(())
            }
            FilterEvent::LogicalGroupStart {
                operator,
                node,
                path,
            } => hook.on_logical_group_start(operator, node, path),
            FilterEvent::LogicalGroupEnd {
                operator,
                node,
                path,
            } => {
                hook.on_logical_group_end(operator, node, path);
                Ok(())
            }
            FilterEvent::OrderBy {
                field,
                direction,
                path,
            } => {
                hook.on_order_by(field, direction, path);
                Ok(())
            }
            FilterEvent::AggregateField {
                function,
                field,
                options,
            } => hook.on_aggregate_field(function, field, options),
            FilterEvent::Limit(limit) => {
                hook.on_limit(limit);
                Ok(())
            }
            FilterEvent::Offset(offset) => {
                hook.on_offset(offset);
                Ok(())
            }
        }
    }
}

/// Compact one-line rendering used by the logging hooks,
/// e.g. `comparison age _gt 18 [user]`
impl fmt::Display for FilterEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterEvent::Comparison {
                field,
                operator,
                value,
                path,
            } => write!(f, "comparison {} {} {} [{}]", field, operator, value, path.join(".")),
            FilterEvent::NestedNodeStart {
                field,
                section,
                path,
                ..
            } => write!(f, "nested_start {} {} [{}]", section, field, path.join(".")),
            FilterEvent::NestedNodeEnd {
                field,
                section,
                path,
                ..
            } => write!(f, "nested_end {} {} [{}]", section, field, path.join(".")),
            FilterEvent::LogicalGroupStart { operator, path, .. } => {
                write!(f, "group_start {} [{}]", operator, path.join("."))
            }
            FilterEvent::LogicalGroupEnd { operator, path, .. } => {
                write!(f, "group_end {} [{}]", operator, path.join("."))
            }
            FilterEvent::OrderBy {
                field,
                direction,
                path,
            } => write!(f, "order_by {} {} [{}]", field, direction, path.join(".")),
            FilterEvent::AggregateField {
                function,
                field,
                options,
            } => match options {
                Some(options) => write!(
                    f,
                    "aggregate {} {} {}",
                    function,
                    field,
                    Value::Object((*options).clone())
                ),
                None => write!(f, "aggregate {} {}", function, field),
            },
            FilterEvent::Limit(limit) => write!(f, "limit {}", limit),
            FilterEvent::Offset(offset) => write!(f, "offset {}", offset),
        }
    }
}

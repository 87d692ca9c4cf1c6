//! Hasura-style filter traversal
//!
//! The inspector walks the `where`, `aggregate` and `order_by` sections of
//! a filter document (plus `limit`/`offset`) and turns them into a stream
//! of [`FilterEvent`]s delivered to every registered hook.

use crate::errors::FilterError;
use crate::event::{FilterEvent, Section, KEY_AGGREGATE, KEY_LIMIT, KEY_OFFSET, KEY_ORDER_BY, KEY_WHERE};
use crate::hook::FilterHook;
use crate::ordering::SortOrder;
use crate::path::{build_path, dotted_path, parent_path};
use serde_json::{Map, Value};

pub const OP_AND: &str = "_and";
pub const OP_OR: &str = "_or";
pub const OP_NOT: &str = "_not";
pub const OP_EQ: &str = "_eq";
pub const OP_IS_NULL: &str = "_is_null";

/// Aggregate field used when an options object names no field
pub const ALL_FIELDS: &str = "*";

static IS_NULL_TRUE: Value = Value::Bool(true);

pub fn is_logical_operator(key: &str) -> bool {
    matches!(key, OP_AND | OP_OR | OP_NOT)
}

/// Walks filter documents and notifies hooks
///
/// The inspector itself is stateless and can be shared freely; all
/// translation state lives in the hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasuraInspector;

impl HasuraInspector {
    pub fn new() -> Self {
        Self
    }

    /// Inspect a filter given as JSON text
    ///
    /// A blank string is an empty filter. Sections are processed in the
    /// order `where`, `aggregate`, `order_by`, `limit`, `offset`.
    pub fn inspect(
        &self,
        filter_json: &str,
        hooks: &mut [&mut dyn FilterHook],
    ) -> Result<(), FilterError> {
        if filter_json.trim().is_empty() {
            return Ok(());
        }

        let filter: Value = serde_json::from_str(filter_json)?;
        self.inspect_value(&filter, hooks)
    }

    /// Inspect an already parsed filter document
    ///
    /// Non-object documents and unknown top-level keys are ignored.
    pub fn inspect_value(
        &self,
        filter: &Value,
        hooks: &mut [&mut dyn FilterHook],
    ) -> Result<(), FilterError> {
        let Value::Object(sections) = filter else {
            debug_log!("Ignoring non-object filter document");
            return Ok(());
        };

        debug_log!(
            "Inspecting filter with {} top-level keys for {} hooks",
            sections.len(),
            hooks.len()
        );

        if let Some(node) = sections.get(KEY_WHERE) {
            self.process_where_node(hooks, "", node, &[])?;
        }

        if let Some(node) = sections.get(KEY_AGGREGATE) {
            self.process_aggregate_node(hooks, node)?;
        }

        if let Some(node) = sections.get(KEY_ORDER_BY) {
            self.process_order_by_node(hooks, "", node, &[])?;
        }

        if let Some(node) = sections.get(KEY_LIMIT) {
            let limit = pagination_value(KEY_LIMIT, node)?;
            emit(hooks, FilterEvent::Limit(limit))?;
        }

        if let Some(node) = sections.get(KEY_OFFSET) {
            let offset = pagination_value(KEY_OFFSET, node)?;
            emit(hooks, FilterEvent::Offset(offset))?;
        }

        Ok(())
    }

    /// Recursively process a `where` node
    ///
    /// Entering a field's object always pushes the field name onto the
    /// path. Operator keys strip it back off, so comparisons are qualified
    /// by ancestor relations only, never by the compared field itself.
    fn process_where_node(
        &self,
        hooks: &mut [&mut dyn FilterHook],
        field: &str,
        node: &Value,
        path: &[String],
    ) -> Result<(), FilterError> {
        if let Value::Array(children) = node {
            for child in children {
                self.process_where_node(hooks, field, child, path)?;
            }
            return Ok(());
        }

        let Value::Object(entries) = node else {
            return Err(FilterError::InvalidFilterNode {
                path: dotted_path(KEY_WHERE, path),
            });
        };

        for (key, value) in entries {
            if key.trim().is_empty() {
                return Err(FilterError::EmptyKey {
                    path: dotted_path(KEY_WHERE, path),
                });
            }

            if key.starts_with('_') {
                let previous_path = parent_path(path);

                if is_logical_operator(key) {
                    emit(
                        hooks,
                        FilterEvent::LogicalGroupStart {
                            operator: key,
                            node,
                            path,
                        },
                    )?;

                    self.process_where_node(hooks, field, value, &previous_path)?;

                    emit(
                        hooks,
                        FilterEvent::LogicalGroupEnd {
                            operator: key,
                            node,
                            path,
                        },
                    )?;
                } else {
                    emit(
                        hooks,
                        FilterEvent::Comparison {
                            field,
                            operator: key,
                            value,
                            path: &previous_path,
                        },
                    )?;
                }
            } else if value.is_object() {
                emit(
                    hooks,
                    FilterEvent::NestedNodeStart {
                        field: key,
                        node: value,
                        section: Section::Where,
                        path,
                    },
                )?;

                let nested_path = build_path(path, &[key]);
                self.process_where_node(hooks, key, value, &nested_path)?;

                emit(
                    hooks,
                    FilterEvent::NestedNodeEnd {
                        field: key,
                        node: value,
                        section: Section::Where,
                        path,
                    },
                )?;
            } else if value.is_null() {
                // `{"field": null}` is sugar for `{"field": {"_is_null": true}}`
                emit(
                    hooks,
                    FilterEvent::Comparison {
                        field: key,
                        operator: OP_IS_NULL,
                        value: &IS_NULL_TRUE,
                        path,
                    },
                )?;
            } else {
                // `{"field": value}` is sugar for `{"field": {"_eq": value}}`
                emit(
                    hooks,
                    FilterEvent::Comparison {
                        field: key,
                        operator: OP_EQ,
                        value,
                        path,
                    },
                )?;
            }
        }

        Ok(())
    }

    fn process_order_by_node(
        &self,
        hooks: &mut [&mut dyn FilterHook],
        field: &str,
        node: &Value,
        path: &[String],
    ) -> Result<(), FilterError> {
        if let Value::Array(children) = node {
            for child in children {
                self.process_order_by_node(hooks, field, child, path)?;
            }
            return Ok(());
        }

        let Value::Object(entries) = node else {
            return Err(FilterError::InvalidOrderByNode {
                path: dotted_path(KEY_ORDER_BY, path),
            });
        };

        for (key, value) in entries {
            if key.trim().is_empty() {
                return Err(FilterError::EmptyKey {
                    path: dotted_path(KEY_ORDER_BY, path),
                });
            }

            if value.is_object() {
                emit(
                    hooks,
                    FilterEvent::NestedNodeStart {
                        field: key,
                        node: value,
                        section: Section::OrderBy,
                        path,
                    },
                )?;

                let nested_path = build_path(path, &[key]);
                self.process_order_by_node(hooks, key, value, &nested_path)?;

                emit(
                    hooks,
                    FilterEvent::NestedNodeEnd {
                        field: key,
                        node: value,
                        section: Section::OrderBy,
                        path,
                    },
                )?;
            } else {
                let direction = SortOrder::from_json(value)?;
                emit(
                    hooks,
                    FilterEvent::OrderBy {
                        field: key,
                        direction,
                        path,
                    },
                )?;
            }
        }

        Ok(())
    }

    fn process_aggregate_node(
        &self,
        hooks: &mut [&mut dyn FilterHook],
        node: &Value,
    ) -> Result<(), FilterError> {
        let Value::Object(functions) = node else {
            return Err(FilterError::InvalidAggregateNode(
                "must be an object".to_string(),
            ));
        };

        for (function, value) in functions {
            if function.trim().is_empty() {
                return Err(FilterError::EmptyAggregateFunctionName);
            }

            let (fields, options) = parse_aggregate_value(value).ok_or_else(|| {
                FilterError::InvalidAggregateNode(format!(
                    "invalid value for aggregate function {}",
                    function
                ))
            })?;

            for field in fields {
                emit(
                    hooks,
                    FilterEvent::AggregateField {
                        function,
                        field,
                        options,
                    },
                )?;
            }
        }

        Ok(())
    }
}

/// Deliver an event to every hook in registration order
fn emit(hooks: &mut [&mut dyn FilterHook], event: FilterEvent<'_>) -> Result<(), FilterError> {
    trace_log!("{}", event);

    for hook in hooks.iter_mut() {
        event.dispatch(&mut **hook)?;
    }

    Ok(())
}

/// Resolve the fields (and options) named by an aggregate function value
///
/// Accepted shapes: `"price"`, `["price", "qty"]` and
/// `{"field": "id", ...options}` where a missing field means `*`.
fn parse_aggregate_value(value: &Value) -> Option<(Vec<&str>, Option<&Map<String, Value>>)> {
    match value {
        Value::String(field) if !field.trim().is_empty() => Some((vec![field.as_str()], None)),
        Value::Array(items) if !items.is_empty() => {
            let fields = items
                .iter()
                .map(|item| item.as_str().filter(|f| !f.trim().is_empty()))
                .collect::<Option<Vec<_>>>()?;
            Some((fields, None))
        }
        Value::Object(options) => {
            let field = match options.get("field") {
                None | Some(Value::Null) => ALL_FIELDS,
                Some(Value::String(field)) if field.trim().is_empty() => ALL_FIELDS,
                Some(Value::String(field)) => field.as_str(),
                Some(_) => return None,
            };
            Some((vec![field], Some(options)))
        }
        _ => None,
    }
}

fn pagination_value(key: &str, node: &Value) -> Result<u64, FilterError> {
    node.as_u64().ok_or_else(|| FilterError::InvalidPagination {
        key: key.to_string(),
        value: node.to_string(),
    })
}

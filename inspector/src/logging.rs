//! Observability hooks
//!
//! Both hooks accept every event and never fail, so they can be registered
//! next to a translating hook without changing its outcome.

use crate::errors::FilterError;
use crate::event::{FilterEvent, Section};
use crate::hook::FilterHook;
use crate::ordering::SortOrder;
use serde_json::{Map, Value};

/// Hook that logs each event through `tracing` at debug level
#[derive(Debug, Clone, Default)]
pub struct TracingHook {
    target_name: Option<String>,
    events_seen: usize,
}

impl TracingHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag every log line with a name, e.g. the entity being filtered
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            target_name: Some(name.into()),
            events_seen: 0,
        }
    }

    pub fn events_seen(&self) -> usize {
        self.events_seen
    }

    fn record(&mut self, event: FilterEvent<'_>) {
        self.events_seen += 1;
        match &self.target_name {
            Some(name) => tracing::debug!(filter = %name, seq = self.events_seen, "{}", event),
            None => tracing::debug!(seq = self.events_seen, "{}", event),
        }
    }
}

/// Hook that keeps the display form of every event it receives
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }

    fn record(&mut self, event: FilterEvent<'_>) {
        self.entries.push(event.to_string());
    }
}

macro_rules! impl_recording_hook {
    ($hook:ty) => {
        impl FilterHook for $hook {
            fn on_comparison(
                &mut self,
                field: &str,
                operator: &str,
                value: &Value,
                path: &[String],
            ) -> Result<(), FilterError> {
                self.record(FilterEvent::Comparison {
                    field,
                    operator,
                    value,
                    path,
                });
                Ok(())
            }

            fn on_nested_node_start(
                &mut self,
                field: &str,
                node: &Value,
                section: Section,
                path: &[String],
            ) {
                self.record(FilterEvent::NestedNodeStart {
                    field,
                    node,
                    section,
                    path,
                });
            }

            fn on_nested_node_end(
                &mut self,
                field: &str,
                node: &Value,
                section: Section,
                path: &[String],
            ) {
                self.record(FilterEvent::NestedNodeEnd {
                    field,
                    node,
                    section,
                    path,
                });
            }

            fn on_logical_group_start(
                &mut self,
                operator: &str,
                node: &Value,
                path: &[String],
            ) -> Result<(), FilterError> {
                self.record(FilterEvent::LogicalGroupStart {
                    operator,
                    node,
                    path,
                });
                Ok(())
            }

            fn on_logical_group_end(&mut self, operator: &str, node: &Value, path: &[String]) {
                self.record(FilterEvent::LogicalGroupEnd {
                    operator,
                    node,
                    path,
                });
            }

            fn on_order_by(&mut self, field: &str, direction: SortOrder, path: &[String]) {
                self.record(FilterEvent::OrderBy {
                    field,
                    direction,
                    path,
                });
            }

            fn on_aggregate_field(
                &mut self,
                function: &str,
                field: &str,
                options: Option<&Map<String, Value>>,
            ) -> Result<(), FilterError> {
                self.record(FilterEvent::AggregateField {
                    function,
                    field,
                    options,
                });
                Ok(())
            }

            fn on_limit(&mut self, limit: u64) {
                self.record(FilterEvent::Limit(limit));
            }

            fn on_offset(&mut self, offset: u64) {
                self.record(FilterEvent::Offset(offset));
            }
        }
    };
}

impl_recording_hook!(TracingHook);
impl_recording_hook!(EventLog);

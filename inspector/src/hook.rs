//! Hook contract consumed by the inspector

use crate::errors::FilterError;
use crate::event::Section;
use crate::ordering::SortOrder;
use serde_json::{Map, Value};

/// Consumer of inspection events
///
/// A hook is stateful and intended for a single `inspect` call; it is
/// not meant to be shared between threads or reused across filters.
/// When several hooks are registered each event reaches them in
/// registration order, so the only coordination between hooks is that
/// total order.
///
/// Callbacks returning `Result` abort the walk on error. The remaining
/// callbacks are notifications with empty default bodies.
pub trait FilterHook {
    /// A field compared with an operator, e.g. `age _gt 18`
    fn on_comparison(
        &mut self,
        field: &str,
        operator: &str,
        value: &Value,
        path: &[String],
    ) -> Result<(), FilterError>;

    fn on_nested_node_start(
        &mut self,
        _field: &str,
        _node: &Value,
        _section: Section,
        _path: &[String],
    ) {
    }

    fn on_nested_node_end(
        &mut self,
        _field: &str,
        _node: &Value,
        _section: Section,
        _path: &[String],
    ) {
    }

    /// Entering `_and`, `_or` or `_not`
    fn on_logical_group_start(
        &mut self,
        operator: &str,
        node: &Value,
        path: &[String],
    ) -> Result<(), FilterError>;

    fn on_logical_group_end(&mut self, operator: &str, node: &Value, path: &[String]);

    fn on_order_by(&mut self, field: &str, direction: SortOrder, path: &[String]);

    /// One field of an aggregate function; `options` is the options object when given
    fn on_aggregate_field(
        &mut self,
        function: &str,
        field: &str,
        options: Option<&Map<String, Value>>,
    ) -> Result<(), FilterError>;

    fn on_limit(&mut self, _limit: u64) {}

    fn on_offset(&mut self, _offset: u64) {}
}

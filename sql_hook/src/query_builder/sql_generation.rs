//! SQL generation from inspection events
//!
//! [`SqlParseHook`] consumes the inspector's event stream and accumulates a
//! parameterized WHERE clause, ORDER BY entries, aggregate expressions and
//! pagination. Every bound value gets its `$n` placeholder at the moment it
//! is appended, so placeholder order always matches parameter order.

use crate::dialect::DialectConfig;
use crate::query_builder::aggregation::{AggregateRequest, AggregateSet};
use crate::query_builder::builder::SqlQueryBuilder;
use crate::query_builder::filter::{LogicalGroupStack, LogicalOperator};
use crate::query_builder::pagination::Pagination;
use inspector::inspector::OP_IS_NULL;
use inspector::{FilterError, FilterHook, SortOrder};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use type_mapping::{is_truthy, json_kind, SqlValue};

const OP_IN: &str = "_in";
const OP_NIN: &str = "_nin";

/// Stateful hook turning filter events into SQL fragments
///
/// A hook is built for one `inspect` call. After an error its partial state
/// must be discarded.
#[derive(Debug)]
pub struct SqlParseHook {
    dialect: Arc<DialectConfig>,
    conditions: Vec<String>,
    params: Vec<SqlValue>,
    next_placeholder: usize,
    groups: LogicalGroupStack,
    order_by: Vec<String>,
    aggregates: AggregateSet,
    pagination: Pagination,
}

impl Default for SqlParseHook {
    fn default() -> Self {
        Self::new(Arc::new(DialectConfig::ansi()))
    }
}

impl SqlParseHook {
    pub fn new(dialect: Arc<DialectConfig>) -> Self {
        Self {
            dialect,
            conditions: Vec::new(),
            params: Vec::new(),
            next_placeholder: 1,
            groups: LogicalGroupStack::new(),
            order_by: Vec::new(),
            aggregates: AggregateSet::new(),
            pagination: Pagination::new(),
        }
    }

    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    /// Top-level conditions joined with ` AND `, without the `WHERE` keyword
    pub fn where_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    /// Parameters in placeholder order
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// ORDER BY entries joined with `, `, without the keyword
    pub fn order_by_clause(&self) -> String {
        self.order_by.join(", ")
    }

    /// `EXPR AS alias` entries in emission order
    pub fn aggregates(&self) -> Vec<String> {
        self.aggregates.select_list()
    }

    pub fn aggregate_map(&self) -> &HashMap<String, String> {
        self.aggregates.as_map()
    }

    pub fn limit(&self) -> Option<u64> {
        self.pagination.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.pagination.offset
    }

    pub fn into_query_builder(self) -> SqlQueryBuilder {
        SqlQueryBuilder::new(
            self.conditions,
            self.params,
            self.order_by,
            self.aggregates,
            self.pagination,
        )
    }

    /// Append a value to the parameter list and return its placeholder
    fn bind(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        let placeholder = format!("${}", self.next_placeholder);
        self.next_placeholder += 1;
        placeholder
    }

    fn add_condition(&mut self, condition: String) {
        if let Some(condition) = self.groups.add(condition) {
            self.conditions.push(condition);
        }
    }

    fn sql_operator(&self, operator: &str) -> Result<String, FilterError> {
        self.dialect
            .operator(operator)
            .map(str::to_string)
            .ok_or_else(|| FilterError::UnsupportedOperator(operator.to_string()))
    }

    fn in_condition(
        &mut self,
        column: &str,
        operator: &str,
        value: &Value,
    ) -> Result<String, FilterError> {
        let Value::Array(items) = value else {
            return Err(FilterError::ArrayValueExpected(json_kind(value).to_string()));
        };
        let sql_op = self.sql_operator(operator)?;

        // Empty lists match nothing (IN) or everything (NOT IN)
        if items.is_empty() {
            return Ok(if operator == OP_IN { "1=0" } else { "1=1" }.to_string());
        }

        let placeholders = items
            .iter()
            .map(|item| {
                let param = self.dialect.convert(item);
                self.bind(param)
            })
            .collect::<Vec<_>>();

        Ok(format!("{} {} ({})", column, sql_op, placeholders.join(", ")))
    }
}

impl FilterHook for SqlParseHook {
    fn on_comparison(
        &mut self,
        field: &str,
        operator: &str,
        value: &Value,
        path: &[String],
    ) -> Result<(), FilterError> {
        let column = self.dialect.namer().column(field, path);

        let condition = match operator {
            OP_IS_NULL => {
                if is_truthy(value) {
                    format!("{} IS NULL", column)
                } else {
                    format!("{} IS NOT NULL", column)
                }
            }
            OP_IN | OP_NIN => self.in_condition(&column, operator, value)?,
            _ => {
                let sql_op = self.sql_operator(operator)?;
                let param = self.dialect.convert(value);
                let placeholder = self.bind(param);
                format!("{} {} {}", column, sql_op, placeholder)
            }
        };

        crate::trace_log!("Rendered condition: {}", condition);
        self.add_condition(condition);
        Ok(())
    }

    fn on_logical_group_start(
        &mut self,
        operator: &str,
        _node: &Value,
        _path: &[String],
    ) -> Result<(), FilterError> {
        let operator = LogicalOperator::from_key(operator)?;
        self.groups.push(operator);
        Ok(())
    }

    fn on_logical_group_end(&mut self, _operator: &str, _node: &Value, _path: &[String]) {
        let Some(group) = self.groups.pop() else {
            return;
        };

        match group.render() {
            Some(condition) => self.add_condition(condition),
            None => {
                crate::debug_log!(
                    "Discarding empty logical group at depth {}",
                    self.groups.depth()
                );
            }
        }
    }

    fn on_order_by(&mut self, field: &str, direction: SortOrder, path: &[String]) {
        let column = self.dialect.namer().column(field, path);
        self.order_by.push(format!("{} {}", column, direction.to_sql()));
    }

    fn on_aggregate_field(
        &mut self,
        function: &str,
        field: &str,
        options: Option<&Map<String, Value>>,
    ) -> Result<(), FilterError> {
        let sql_function = self
            .dialect
            .aggregate_function(function)
            .ok_or_else(|| FilterError::UnsupportedAggregateFunction(function.to_string()))?;

        let request = AggregateRequest::new(function, sql_function, field).with_options(options);
        let aggregate = self
            .dialect
            .aggregate_builder()
            .build(&request, &self.dialect.namer())?;

        crate::trace_log!("Rendered aggregate {}: {}", aggregate.alias, aggregate.expr);
        self.aggregates.insert(aggregate);
        Ok(())
    }

    fn on_limit(&mut self, limit: u64) {
        self.pagination.limit = Some(limit);
    }

    fn on_offset(&mut self, offset: u64) {
        self.pagination.offset = Some(offset);
    }
}

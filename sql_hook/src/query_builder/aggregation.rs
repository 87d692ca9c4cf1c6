//! Aggregate expressions
//!
//! This module provides the aggregate builder contract, the standard
//! `FN(DISTINCT? col)` builder and the ordered alias → expression set.

use crate::dialect::ColumnNamer;
use inspector::inspector::ALL_FIELDS;
use inspector::{FilterError, SortOrder};
use serde_json::{Map, Value};
use std::collections::HashMap;
use type_mapping::is_truthy;

/// One aggregate field to render
#[derive(Debug, Clone, Copy)]
pub struct AggregateRequest<'a> {
    /// Function key from the filter, e.g. `string_agg`
    pub function: &'a str,
    /// SQL function from the dialect table, e.g. `STRING_AGG`
    pub sql_function: &'a str,
    pub field: &'a str,
    pub options: Option<&'a Map<String, Value>>,
}

impl<'a> AggregateRequest<'a> {
    pub fn new(function: &'a str, sql_function: &'a str, field: &'a str) -> Self {
        Self {
            function,
            sql_function,
            field,
            options: None,
        }
    }

    pub fn with_options(mut self, options: Option<&'a Map<String, Value>>) -> Self {
        self.options = options;
        self
    }

    pub fn option(&self, key: &str) -> Option<&'a Value> {
        self.options.and_then(|options| options.get(key))
    }

    /// Boolean option read leniently; absent means false
    pub fn flag(&self, key: &str) -> bool {
        self.option(key).is_some_and(is_truthy)
    }

    /// String option; absent or null is `None`, other types are rejected
    pub fn string_option(&self, key: &str) -> Result<Option<&'a str>, FilterError> {
        match self.option(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(FilterError::aggregate_option(
                self.function,
                format!("{} must be a string, got {}", key, other),
            )),
        }
    }

    /// `direction` option, ASC when absent
    pub fn direction(&self) -> Result<SortOrder, FilterError> {
        match self.option("direction") {
            None | Some(Value::Null) => Ok(SortOrder::Asc),
            Some(value) => SortOrder::from_json(value),
        }
    }

    pub fn is_all_fields(&self) -> bool {
        self.field == ALL_FIELDS
    }

    /// `function` or `function_field` with dots replaced by underscores
    pub fn alias(&self) -> String {
        if self.is_all_fields() {
            self.function.to_string()
        } else {
            format!("{}_{}", self.function, self.field.replace('.', "_"))
        }
    }

    /// Fail unless a concrete field is named
    pub fn require_field(&self) -> Result<(), FilterError> {
        if self.is_all_fields() {
            Err(FilterError::aggregate_option(
                self.function,
                "a specific field is required, not '*'",
            ))
        } else {
            Ok(())
        }
    }
}

/// Rendered aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateExpr {
    pub expr: String,
    pub alias: String,
}

impl AggregateExpr {
    pub fn new(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: alias.into(),
        }
    }
}

/// Strategy rendering one aggregate field into SQL
pub trait AggregateExprBuilder: Send + Sync {
    fn build(
        &self,
        request: &AggregateRequest<'_>,
        namer: &ColumnNamer<'_>,
    ) -> Result<AggregateExpr, FilterError>;
}

impl<F> AggregateExprBuilder for F
where
    F: Fn(&AggregateRequest<'_>, &ColumnNamer<'_>) -> Result<AggregateExpr, FilterError>
        + Send
        + Sync,
{
    fn build(
        &self,
        request: &AggregateRequest<'_>,
        namer: &ColumnNamer<'_>,
    ) -> Result<AggregateExpr, FilterError> {
        self(request, namer)
    }
}

/// `FN(col)`, `FN(DISTINCT col)` or `FN(*)`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAggregateBuilder;

impl AggregateExprBuilder for DefaultAggregateBuilder {
    fn build(
        &self,
        request: &AggregateRequest<'_>,
        namer: &ColumnNamer<'_>,
    ) -> Result<AggregateExpr, FilterError> {
        let distinct = request.flag("distinct");
        if distinct && request.is_all_fields() {
            return Err(FilterError::aggregate_option(
                request.function,
                "DISTINCT can only be used with specific fields, not '*'",
            ));
        }

        let column = if request.is_all_fields() {
            ALL_FIELDS.to_string()
        } else {
            namer.column(request.field, &[])
        };

        Ok(AggregateExpr::new(
            format!(
                "{}({}{})",
                request.sql_function,
                if distinct { "DISTINCT " } else { "" },
                column
            ),
            request.alias(),
        ))
    }
}

/// Alias → expression map that remembers first-emission order
///
/// Re-inserting an alias replaces its expression in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSet {
    expressions: HashMap<String, String>,
    order: Vec<String>,
}

impl AggregateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, aggregate: AggregateExpr) {
        if self
            .expressions
            .insert(aggregate.alias.clone(), aggregate.expr)
            .is_none()
        {
            self.order.push(aggregate.alias);
        }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.expressions.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(alias, expression)` pairs in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order.iter().filter_map(|alias| {
            self.expressions
                .get(alias)
                .map(|expr| (alias.as_str(), expr.as_str()))
        })
    }

    /// `EXPR AS alias` entries in emission order
    pub fn select_list(&self) -> Vec<String> {
        self.iter()
            .map(|(alias, expr)| format!("{} AS {}", expr, alias))
            .collect()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.expressions
    }
}

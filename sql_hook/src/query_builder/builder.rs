//! SELECT assembly

use crate::query_builder::aggregation::AggregateSet;
use crate::query_builder::pagination::Pagination;
use std::collections::HashMap;
use type_mapping::SqlValue;

/// Accumulated filter state ready to be rendered as a SELECT statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlQueryBuilder {
    pub(crate) conditions: Vec<String>,
    pub(crate) params: Vec<SqlValue>,
    pub(crate) order_by: Vec<String>,
    pub(crate) aggregates: AggregateSet,
    pub(crate) pagination: Pagination,
}

impl SqlQueryBuilder {
    pub fn new(
        conditions: Vec<String>,
        params: Vec<SqlValue>,
        order_by: Vec<String>,
        aggregates: AggregateSet,
        pagination: Pagination,
    ) -> Self {
        Self {
            conditions,
            params,
            order_by,
            aggregates,
            pagination,
        }
    }

    pub fn where_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    pub fn order_by_clause(&self) -> String {
        self.order_by.join(", ")
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn into_params(self) -> Vec<SqlValue> {
        self.params
    }

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

    /// Build a complete SELECT statement
    ///
    /// Selects the aggregates followed by `columns`, or `*` when both are
    /// empty. `GROUP BY` lists the columns only when aggregates are present.
    pub fn build(&self, entity: &str, columns: &[&str]) -> String {
        let mut selected = self.aggregates.select_list();
        selected.extend(columns.iter().map(|column| column.to_string()));
        if selected.is_empty() {
            selected.push("*".to_string());
        }

        let mut sql = String::with_capacity(64);
        sql.push_str("SELECT ");
        sql.push_str(&selected.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(entity);

        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clause());
        }

        if !self.aggregates.is_empty() && !columns.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&columns.join(", "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by_clause());
        }

        if !self.pagination.is_empty() {
            sql.push(' ');
            sql.push_str(&self.pagination.to_sql());
        }

        sql
    }

    /// SELECT statement together with its parameters
    pub fn build_with_params(&self, entity: &str, columns: &[&str]) -> (String, Vec<SqlValue>) {
        (self.build(entity, columns), self.params.clone())
    }
}

//! Dialect configuration
//!
//! A dialect is plain data plus two strategies: the operator and aggregate
//! function tables, the identifier delimiter, the JSON → parameter value
//! converter and the aggregate expression builder. Dialects are immutable
//! once built and are shared between hooks through an `Arc`.

pub mod ansi;
pub mod postgres;

use crate::query_builder::aggregation::{AggregateExprBuilder, DefaultAggregateBuilder};
use config::{ConfigError, DialectProfile, DialectSettings};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use type_mapping::{json_to_sql_value, SqlValue};

pub use postgres::PostgresAggregateBuilder;

/// Converts a comparison value into the native parameter bound to `$n`
pub type ConvertValueFn = Arc<dyn Fn(&Value) -> SqlValue + Send + Sync>;

pub const DEFAULT_NAME_DELIMITER: &str = "\"";

/// Renders quoted, path-qualified column references
#[derive(Debug, Clone, Copy)]
pub struct ColumnNamer<'a> {
    delimiter: &'a str,
}

impl<'a> ColumnNamer<'a> {
    pub fn new(delimiter: &'a str) -> Self {
        Self { delimiter }
    }

    /// Wrap an identifier in the delimiter
    pub fn quote(&self, identifier: &str) -> String {
        format!("{d}{}{d}", identifier.trim(), d = self.delimiter)
    }

    /// `"field"` or `"a__b"."field"` when the path is non-empty
    pub fn column(&self, field: &str, path: &[String]) -> String {
        let field = self.quote(field);
        if path.is_empty() {
            field
        } else {
            format!("{}.{}", self.quote(&path.join("__")), field)
        }
    }
}

/// Tables and strategies parameterizing the SQL hook
#[derive(Clone)]
pub struct DialectConfig {
    name: String,
    operator_map: HashMap<String, String>,
    aggregate_fn_map: HashMap<String, String>,
    name_delimiter: String,
    convert_value: ConvertValueFn,
    aggregate_builder: Arc<dyn AggregateExprBuilder>,
}

impl fmt::Debug for DialectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectConfig")
            .field("name", &self.name)
            .field("operators", &self.operator_map.len())
            .field("aggregate_functions", &self.aggregate_fn_map.len())
            .field("name_delimiter", &self.name_delimiter)
            .field("convert_value", &"<fn>")
            .field("aggregate_builder", &"<builder>")
            .finish()
    }
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::ansi()
    }
}

impl DialectConfig {
    /// Standard SQL comparison operators and aggregate functions
    pub fn ansi() -> Self {
        Self {
            name: "ansi".to_string(),
            operator_map: to_owned_map(ansi::OPERATORS),
            aggregate_fn_map: to_owned_map(ansi::AGGREGATE_FUNCTIONS),
            name_delimiter: DEFAULT_NAME_DELIMITER.to_string(),
            convert_value: Arc::new(json_to_sql_value),
            aggregate_builder: Arc::new(DefaultAggregateBuilder),
        }
    }

    /// ANSI tables extended with PostgreSQL operators and aggregates
    pub fn postgres() -> Self {
        let mut dialect = Self::ansi();
        dialect.name = "postgres".to_string();
        dialect
            .operator_map
            .extend(to_owned_map(postgres::OPERATORS));
        dialect
            .aggregate_fn_map
            .extend(to_owned_map(postgres::AGGREGATE_FUNCTIONS));
        dialect.aggregate_builder = Arc::new(PostgresAggregateBuilder);
        dialect
    }

    pub fn for_profile(profile: DialectProfile) -> Self {
        match profile {
            DialectProfile::Ansi => Self::ansi(),
            DialectProfile::Postgres => Self::postgres(),
        }
    }

    /// Build a dialect from configuration, merging overrides over the profile tables
    pub fn from_settings(settings: &DialectSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut dialect =
            Self::for_profile(settings.profile).with_name_delimiter(&settings.name_delimiter);
        for (operator, sql) in &settings.operators {
            dialect = dialect.with_operator(operator, sql);
        }
        for (function, sql) in &settings.aggregate_functions {
            dialect = dialect.with_aggregate_function(function, sql);
        }

        crate::debug_log!(
            "Built {} dialect with {} operators and {} aggregate functions",
            dialect.name,
            dialect.operator_map.len(),
            dialect.aggregate_fn_map.len()
        );

        Ok(dialect)
    }

    pub fn with_name_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.name_delimiter = delimiter.into();
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>, sql: impl Into<String>) -> Self {
        self.operator_map.insert(operator.into(), sql.into());
        self
    }

    pub fn without_operator(mut self, operator: &str) -> Self {
        self.operator_map.remove(operator);
        self
    }

    pub fn with_aggregate_function(
        mut self,
        function: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        self.aggregate_fn_map.insert(function.into(), sql.into());
        self
    }

    pub fn with_value_converter<F>(mut self, convert: F) -> Self
    where
        F: Fn(&Value) -> SqlValue + Send + Sync + 'static,
    {
        self.convert_value = Arc::new(convert);
        self
    }

    pub fn with_aggregate_builder<B>(mut self, builder: B) -> Self
    where
        B: AggregateExprBuilder + 'static,
    {
        self.aggregate_builder = Arc::new(builder);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// SQL symbol for a Hasura operator
    pub fn operator(&self, operator: &str) -> Option<&str> {
        self.operator_map.get(operator).map(String::as_str)
    }

    /// SQL function name for an aggregate function key
    pub fn aggregate_function(&self, function: &str) -> Option<&str> {
        self.aggregate_fn_map.get(function).map(String::as_str)
    }

    pub fn name_delimiter(&self) -> &str {
        &self.name_delimiter
    }

    pub fn namer(&self) -> ColumnNamer<'_> {
        ColumnNamer::new(&self.name_delimiter)
    }

    pub fn convert(&self, value: &Value) -> SqlValue {
        (self.convert_value)(value)
    }

    pub fn aggregate_builder(&self) -> &dyn AggregateExprBuilder {
        self.aggregate_builder.as_ref()
    }
}

fn to_owned_map(table: &[(&str, &str)]) -> HashMap<String, String> {
    table
        .iter()
        .map(|(key, sql)| (key.to_string(), sql.to_string()))
        .collect()
}

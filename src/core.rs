//! Core FilterHaus functionality
//!
//! This module contains the main FilterHaus struct, which owns the dialect
//! configuration and runs one complete translation per call.

use std::sync::Arc;

use inspector::{FilterHook, HasuraInspector};
use sql_hook::{DialectConfig, SqlParseHook, SqlQueryBuilder};
use type_mapping::SqlValue;

use crate::errors::FilterHausError;
use config::AppConfig;

/// Main FilterHaus coordinator translating filter JSON into SQL
///
/// Every translation uses a fresh [`SqlParseHook`], so one `FilterHaus` can
/// be shared between threads.
#[derive(Debug, Clone)]
pub struct FilterHaus {
    dialect: Arc<DialectConfig>,
    inspector: HasuraInspector,
}

impl Default for FilterHaus {
    fn default() -> Self {
        Self::new(DialectConfig::default())
    }
}

impl FilterHaus {
    /// Create new FilterHaus with the given dialect
    pub fn new(dialect: DialectConfig) -> Self {
        Self {
            dialect: Arc::new(dialect),
            inspector: HasuraInspector::new(),
        }
    }

    /// Create FilterHaus from loaded application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, FilterHausError> {
        let dialect = DialectConfig::from_settings(&config.dialect)?;
        crate::debug_log!("FilterHaus using dialect '{}'", dialect.name());
        Ok(Self::new(dialect))
    }

    /// Load configuration via [`AppConfig::load`] and build FilterHaus from it
    pub fn load() -> Result<Self, FilterHausError> {
        let config = AppConfig::load()?;
        Self::from_config(&config)
    }

    /// Get dialect reference
    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    /// Translate a filter into its WHERE, ORDER BY, aggregate and pagination parts
    pub fn translate(&self, filter_json: &str) -> Result<SqlQueryBuilder, FilterHausError> {
        self.translate_with_hooks(filter_json, &mut [])
    }

    /// Translate a filter while also feeding every event to `extra_hooks`
    ///
    /// The SQL hook is registered first, the extra hooks follow in order.
    pub fn translate_with_hooks(
        &self,
        filter_json: &str,
        extra_hooks: &mut [&mut dyn FilterHook],
    ) -> Result<SqlQueryBuilder, FilterHausError> {
        let mut sql_hook = SqlParseHook::new(Arc::clone(&self.dialect));

        {
            let mut hooks: Vec<&mut dyn FilterHook> = Vec::with_capacity(extra_hooks.len() + 1);
            hooks.push(&mut sql_hook);
            for hook in extra_hooks.iter_mut() {
                hooks.push(&mut **hook);
            }
            self.inspector.inspect(filter_json, &mut hooks)?;
        }

        crate::trace_log!("Translated filter: {}", sql_hook.where_clause());
        Ok(sql_hook.into_query_builder())
    }

    /// Translate a filter and assemble a SELECT statement over `entity`
    pub fn select(
        &self,
        filter_json: &str,
        entity: &str,
        columns: &[&str],
    ) -> Result<(String, Vec<SqlValue>), FilterHausError> {
        let builder = self.translate(filter_json)?;
        let sql = builder.build(entity, columns);
        Ok((sql, builder.into_params()))
    }
}

//! Commonly used items for translating filters to SQL

pub use crate::binding::bind_params;
pub use crate::dialect::{ColumnNamer, DialectConfig};
pub use crate::query_builder::{
    AggregateExpr, AggregateExprBuilder, AggregateRequest, SqlParseHook, SqlQueryBuilder,
};
pub use inspector::prelude::*;
pub use type_mapping::SqlValue;

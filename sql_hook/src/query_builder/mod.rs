//! Query builder utilities
//!
//! This module turns inspection events into SQL fragments and assembles
//! them into SELECT statements.

pub mod aggregation;
pub mod builder;
pub mod filter;
pub mod pagination;
pub mod sql_generation;

#[cfg(test)]
mod tests;


pub use aggregation::{
    AggregateExpr, AggregateExprBuilder, AggregateRequest, AggregateSet, DefaultAggregateBuilder,
};
pub use builder::SqlQueryBuilder;
pub use filter::{LogicalGroup, LogicalGroupStack, LogicalOperator};
pub use pagination::Pagination;
pub use sql_generation::SqlParseHook;

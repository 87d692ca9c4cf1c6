//! Logical grouping
//!
//! `_and`, `_or` and `_not` scopes collect already rendered conditions on a
//! stack until the scope closes, then collapse into a single condition.

use inspector::inspector::{OP_AND, OP_NOT, OP_OR};
use inspector::FilterError;

/// Logical operators for combining conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub fn from_key(key: &str) -> Result<Self, FilterError> {
        match key {
            OP_AND => Ok(LogicalOperator::And),
            OP_OR => Ok(LogicalOperator::Or),
            OP_NOT => Ok(LogicalOperator::Not),
            other => Err(FilterError::UnsupportedLogicalOperator(other.to_string())),
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }

    /// Operator joining the members of a group; NOT groups join with AND
    pub fn joiner(&self) -> &'static str {
        match self {
            LogicalOperator::Or => " OR ",
            LogicalOperator::And | LogicalOperator::Not => " AND ",
        }
    }
}

/// One open logical scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalGroup {
    pub operator: LogicalOperator,
    pub operations: Vec<String>,
}

impl LogicalGroup {
    pub fn new(operator: LogicalOperator) -> Self {
        Self {
            operator,
            operations: Vec::new(),
        }
    }

    /// Collapse the group into one condition; empty groups render nothing
    ///
    /// Parentheses are added only around more than one operation, and NOT
    /// groups are prefixed with `NOT `.
    pub fn render(self) -> Option<String> {
        if self.operations.is_empty() {
            return None;
        }

        let parenthesize = self.operations.len() > 1;
        let joined = self.operations.join(self.operator.joiner());
        let condition = if parenthesize {
            format!("({})", joined)
        } else {
            joined
        };

        Some(match self.operator {
            LogicalOperator::Not => format!("NOT {}", condition),
            _ => condition,
        })
    }
}

/// LIFO of open logical groups
#[derive(Debug, Clone, Default)]
pub struct LogicalGroupStack {
    groups: Vec<LogicalGroup>,
}

impl LogicalGroupStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operator: LogicalOperator) {
        self.groups.push(LogicalGroup::new(operator));
    }

    pub fn pop(&mut self) -> Option<LogicalGroup> {
        self.groups.pop()
    }

    /// Innermost open group
    pub fn current_mut(&mut self) -> Option<&mut LogicalGroup> {
        self.groups.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Append a condition to the innermost group, or hand it back when none is open
    pub fn add(&mut self, condition: String) -> Option<String> {
        match self.current_mut() {
            Some(group) => {
                group.operations.push(condition);
                None
            }
            None => Some(condition),
        }
    }
}

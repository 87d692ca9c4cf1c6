//! Standard SQL tables

/// Hasura operator → SQL operator
pub const OPERATORS: &[(&str, &str)] = &[
    ("_eq", "="),
    ("_neq", "!="),
    ("_gt", ">"),
    ("_lt", "<"),
    ("_gte", ">="),
    ("_lte", "<="),
    ("_in", "IN"),
    ("_nin", "NOT IN"),
    ("_is_null", "IS NULL"),
    ("_like", "LIKE"),
    ("_nlike", "NOT LIKE"),
    ("_ilike", "ILIKE"),
    ("_nilike", "NOT ILIKE"),
];

/// Aggregate function key → SQL function
pub const AGGREGATE_FUNCTIONS: &[(&str, &str)] = &[
    ("count", "COUNT"),
    ("sum", "SUM"),
    ("avg", "AVG"),
    ("max", "MAX"),
    ("min", "MIN"),
    ("stddev", "STDDEV"),
    ("variance", "VARIANCE"),
];

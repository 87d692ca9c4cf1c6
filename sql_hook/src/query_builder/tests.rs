//! SQL generation tests

#[cfg(test)]
mod tests {
    use crate::dialect::DialectConfig;
    use crate::query_builder::SqlParseHook;
    use inspector::{FilterError, HasuraInspector};
    use std::sync::Arc;
    use type_mapping::SqlValue;

    fn translate_with(dialect: DialectConfig, filter: &str) -> Result<SqlParseHook, FilterError> {
        let mut hook = SqlParseHook::new(Arc::new(dialect));
        HasuraInspector::new().inspect(filter, &mut [&mut hook])?;
        Ok(hook)
    }

    fn translate(filter: &str) -> Result<SqlParseHook, FilterError> {
        translate_with(DialectConfig::ansi(), filter)
    }

    fn where_of(filter: &str) -> (String, Vec<SqlValue>) {
        let hook = translate(filter).unwrap();
        (hook.where_clause(), hook.params().to_vec())
    }

    fn text(value: &str) -> SqlValue {
        SqlValue::Text(value.to_string())
    }

    // ========================================
    // Logical groups
    // ========================================

    #[test]
    fn test_empty_groups_are_suppressed() {
        for filter in [
            r#"{"where":{"_and":[]}}"#,
            r#"{"where":{"_or":[]}}"#,
            r#"{"where":{"_not":{}}}"#,
            r#"{"where":{"_not":{"_and":[{"_or":[]}]}}}"#,
        ] {
            let (clause, params) = where_of(filter);
            assert_eq!(clause, "", "filter {}", filter);
            assert!(params.is_empty());
        }
    }

    #[test]
    fn test_and_group() {
        let (clause, params) =
            where_of(r#"{"where":{"_and":[{"age":{"_gte":25}},{"name":{"_like":"%John%"}}]}}"#);
        assert_eq!(clause, "(\"age\" >= $1 AND \"name\" LIKE $2)");
        assert_eq!(params, vec![SqlValue::BigInt(25), text("%John%")]);
    }

    #[test]
    fn test_or_group() {
        let (clause, _) =
            where_of(r#"{"where":{"_or":[{"age":{"_gt":18}},{"name":{"_like":"%John%"}}]}}"#);
        assert_eq!(clause, "(\"age\" > $1 OR \"name\" LIKE $2)");
    }

    #[test]
    fn test_not_groups() {
        let (clause, _) = where_of(r#"{"where":{"_not":{"age":{"_gt":18}}}}"#);
        assert_eq!(clause, "NOT \"age\" > $1");

        let (clause, _) =
            where_of(r#"{"where":{"_not":{"age":{"_gt":18},"name":{"_like":"%John%"}}}}"#);
        assert_eq!(clause, "NOT (\"age\" > $1 AND \"name\" LIKE $2)");

        let (clause, _) = where_of(
            r#"{"where":{"_not":{"_or":[{"age":{"_gt":18}},{"name":{"_like":"%John%"}}]}}}"#,
        );
        assert_eq!(clause, "NOT (\"age\" > $1 OR \"name\" LIKE $2)");

        let (clause, _) = where_of(r#"{"where":{"_not":{"_and":[{"_or":[{"age":{"_gt":18}}]}]}}}"#);
        assert_eq!(clause, "NOT \"age\" > $1");
    }

    #[test]
    fn test_nested_groups() {
        let (clause, params) = where_of(
            r#"{"where":{"_and":[
                {"_or":[{"age":{"_gt":18}},{"name":{"_eq":"John"}}]},
                {"_not":{"_and":[{"age":{"_gt":18}},{"name":{"_like":"%John%"}}]}}
            ]}}"#,
        );
        assert_eq!(
            clause,
            "((\"age\" > $1 OR \"name\" = $2) AND NOT (\"age\" > $3 AND \"name\" LIKE $4))"
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_sugar_mixed_with_groups() {
        let (clause, params) = where_of(
            r#"{"where":{
                "name":"jose",
                "_or":{"age":{"_gt":18},"_not":{"role":{"name":null}}},
                "_not":{"age":{"_gt":18},"role":"admin"}
            }}"#,
        );
        assert_eq!(
            clause,
            "\"name\" = $1 AND (\"age\" > $2 OR NOT \"role\".\"name\" IS NULL) AND NOT (\"age\" > $3 AND \"role\" = $4)"
        );
        assert_eq!(
            params,
            vec![
                text("jose"),
                SqlValue::BigInt(18),
                SqlValue::BigInt(18),
                text("admin")
            ]
        );
    }

    #[test]
    fn test_not_under_relation() {
        let (clause, params) = where_of(r#"{"where":{"_not":{"profile":{"age":{"_lt":30}}}}}"#);
        assert_eq!(clause, "NOT \"profile\".\"age\" < $1");
        assert_eq!(params, vec![SqlValue::BigInt(30)]);
    }

    #[test]
    fn test_logical_group_under_relation_trims_one_level() {
        let (clause, params) = where_of(
            r#"{"where":{"user":{"_or":[{"name":"ann"},{"age":{"_gt":30}}]}}}"#,
        );
        assert_eq!(clause, "(\"name\" = $1 OR \"age\" > $2)");
        assert_eq!(params, vec![text("ann"), SqlValue::BigInt(30)]);

        let (clause, _) = where_of(r#"{"where":{"user":{"profile":{"_and":[{"x":1}]}}}}"#);
        assert_eq!(clause, "\"user\".\"x\" = $1");

        let (clause, _) =
            where_of(r#"{"where":{"user":{"profile":{"_not":{"_or":[{"x":1}]}}}}}"#);
        assert_eq!(clause, "NOT \"x\" = $1");
    }

    #[test]
    fn test_sibling_operators_on_related_field() {
        let (clause, params) = where_of(r#"{"where":{"user":{"age":{"_gt":1,"_lt":5}}}}"#);
        assert_eq!(clause, "\"user\".\"age\" > $1 AND \"user\".\"age\" < $2");
        assert_eq!(params, vec![SqlValue::BigInt(1), SqlValue::BigInt(5)]);

        let (clause, _) = where_of(
            r#"{"where":{"user":{"age":{"_gte":18,"_is_null":false},"_or":[{"role":"admin"}]}}}"#,
        );
        assert_eq!(
            clause,
            "\"user\".\"age\" >= $1 AND \"user\".\"age\" IS NOT NULL AND \"role\" = $2"
        );
    }

    // ========================================
    // Comparison operators
    // ========================================

    #[test]
    fn test_standard_operators() {
        let cases = [
            ("_eq", "="),
            ("_neq", "!="),
            ("_gt", ">"),
            ("_gte", ">="),
            ("_lt", "<"),
            ("_lte", "<="),
        ];

        for (operator, sql) in cases {
            let filter = format!(r#"{{"where":{{"age":{{"{}":18}}}}}}"#, operator);
            let (clause, params) = where_of(&filter);
            assert_eq!(clause, format!("\"age\" {} $1", sql));
            assert_eq!(params, vec![SqlValue::BigInt(18)]);
        }

        for (operator, sql) in [
            ("_like", "LIKE"),
            ("_nlike", "NOT LIKE"),
            ("_ilike", "ILIKE"),
            ("_nilike", "NOT ILIKE"),
        ] {
            let filter = format!(r#"{{"where":{{"name":{{"{}":"%John%"}}}}}}"#, operator);
            let (clause, _) = where_of(&filter);
            assert_eq!(clause, format!("\"name\" {} $1", sql));
        }
    }

    #[test]
    fn test_in_and_nin() {
        let (clause, params) = where_of(r#"{"where":{"age":{"_in":[18, 20, 22]}}}"#);
        assert_eq!(clause, "\"age\" IN ($1, $2, $3)");
        assert_eq!(
            params,
            vec![SqlValue::BigInt(18), SqlValue::BigInt(20), SqlValue::BigInt(22)]
        );

        let (clause, _) = where_of(r#"{"where":{"age":{"_nin":[18, 20, 22]}}}"#);
        assert_eq!(clause, "\"age\" NOT IN ($1, $2, $3)");
    }

    #[test]
    fn test_empty_in_lists() {
        let (clause, params) = where_of(r#"{"where":{"age":{"_in":[]},"name":{"_nin":[]}}}"#);
        assert_eq!(clause, "1=0 AND 1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_in_requires_array() {
        let err = translate(r#"{"where":{"age":{"_in": "invalid array"}}}"#)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "array value expected, got String");

        let err = translate(r#"{"where":{"age":{"_nin": 3}}}"#).err().unwrap();
        assert_eq!(err.to_string(), "array value expected, got Number");
    }

    #[test]
    fn test_is_null() {
        let (clause, params) = where_of(r#"{"where":{"deleted_at":{"_is_null":true}}}"#);
        assert_eq!(clause, "\"deleted_at\" IS NULL");
        assert!(params.is_empty());

        let (clause, _) = where_of(r#"{"where":{"deleted_at":{"_is_null":false}}}"#);
        assert_eq!(clause, "\"deleted_at\" IS NOT NULL");

        let (clause, _) = where_of(r#"{"where":{"deleted_at":{"_is_null":"true"}}}"#);
        assert_eq!(clause, "\"deleted_at\" IS NULL");
    }

    #[test]
    fn test_unsupported_operator() {
        let err = translate(r#"{"where":{"age":{"_invalid":18}}}"#)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "unsupported operator: _invalid");

        let err = translate(r#"{"where":{"name":{"_regex":"^a"}}}"#)
            .err()
            .unwrap();
        assert!(matches!(err, FilterError::UnsupportedOperator(_)));
    }

    #[test]
    fn test_value_conversion() {
        let (clause, params) = where_of(
            r#"{"where":{"name":{"_eq":"John"},"avg":7.5,"is_deleted":false,"count":2.0}}"#,
        );
        assert_eq!(
            clause,
            "\"name\" = $1 AND \"avg\" = $2 AND \"is_deleted\" = $3 AND \"count\" = $4"
        );
        assert_eq!(
            params,
            vec![
                text("John"),
                SqlValue::Float(7.5),
                SqlValue::Boolean(false),
                SqlValue::BigInt(2)
            ]
        );
    }

    // ========================================
    // Qualified names
    // ========================================

    #[test]
    fn test_qualified_columns() {
        let (clause, _) = where_of(r#"{"where":{"user":{"name":{"_eq":"John"}}}}"#);
        assert_eq!(clause, "\"user\".\"name\" = $1");

        let (clause, _) = where_of(r#"{"where":{"user":{"profile":{"name":{"_eq":"X"}}}}}"#);
        assert_eq!(clause, "\"user__profile\".\"name\" = $1");

        let (clause, _) = where_of(
            r#"{"where":{"user":{"name":{"_eq":"John"}},"role":{"permission":{"name":{"_eq":"admin"}}}}}"#,
        );
        assert_eq!(
            clause,
            "\"user\".\"name\" = $1 AND \"role__permission\".\"name\" = $2"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let hook = translate_with(
            DialectConfig::ansi().with_name_delimiter("`"),
            r#"{"where":{"user":{"name":{"_eq":"John"}}},"order_by":{"id":"asc"}}"#,
        )
        .unwrap();
        assert_eq!(hook.where_clause(), "`user`.`name` = $1");
        assert_eq!(hook.order_by_clause(), "`id` ASC");
    }

    // ========================================
    // Ordering
    // ========================================

    #[test]
    fn test_order_by() {
        let hook = translate(r#"{"order_by":[{"name":"asc"},{"age":"desc"}]}"#).unwrap();
        assert_eq!(hook.order_by_clause(), "\"name\" ASC, \"age\" DESC");

        let hook = translate(r#"{"order_by":{"age":"ASC","name":"desc"}}"#).unwrap();
        assert_eq!(hook.order_by_clause(), "\"age\" ASC, \"name\" DESC");

        let hook = translate(
            r#"{"where":{"user":{"age":{"_gt":18}}},"order_by":{"user":{"name":"asc","age":"desc"}}}"#,
        )
        .unwrap();
        assert_eq!(hook.where_clause(), "\"user\".\"age\" > $1");
        assert_eq!(
            hook.order_by_clause(),
            "\"user\".\"name\" ASC, \"user\".\"age\" DESC"
        );
    }

    #[test]
    fn test_order_by_invalid_direction() {
        let err = translate(r#"{"order_by":{"name":"INVALID"}}"#).err().unwrap();
        assert_eq!(err.to_string(), "invalid order_by direction: INVALID");
    }

    // ========================================
    // Aggregates and pagination
    // ========================================

    #[test]
    fn test_aggregates_in_emission_order() {
        let hook = translate(
            r#"{"where":{"status":{"_eq":"active"}},"aggregate":{"count":"*","avg":"rating"}}"#,
        )
        .unwrap();
        assert_eq!(hook.aggregates(), vec!["COUNT(*) AS count", "AVG(\"rating\") AS avg_rating"]);
        assert_eq!(hook.aggregate_map().get("avg_rating").unwrap(), "AVG(\"rating\")");
        assert_eq!(hook.where_clause(), "\"status\" = $1");
    }

    #[test]
    fn test_distinct_count() {
        let hook =
            translate(r#"{"aggregate":{"count":{"field":"user_id","distinct":true}}}"#).unwrap();
        assert_eq!(hook.aggregates(), vec!["COUNT(DISTINCT \"user_id\") AS count_user_id"]);

        let err = translate(r#"{"aggregate":{"count":{"distinct":true}}}"#)
            .err()
            .unwrap();
        assert!(matches!(err, FilterError::InvalidAggregateOption { .. }));
    }

    #[test]
    fn test_unsupported_aggregate() {
        let err = translate(r#"{"aggregate":{"median":"price"}}"#).err().unwrap();
        assert_eq!(err.to_string(), "unsupported aggregate function: median");

        let hook = translate_with(
            DialectConfig::ansi().with_aggregate_function("median", "MEDIAN"),
            r#"{"aggregate":{"median":"price"}}"#,
        )
        .unwrap();
        assert_eq!(hook.aggregates(), vec!["MEDIAN(\"price\") AS median_price"]);
    }

    #[test]
    fn test_multi_field_aggregate() {
        let hook = translate(r#"{"aggregate":{"sum":["price","qty"]}}"#).unwrap();
        assert_eq!(
            hook.aggregates(),
            vec!["SUM(\"price\") AS sum_price", "SUM(\"qty\") AS sum_qty"]
        );
    }

    #[test]
    fn test_pagination() {
        let hook = translate(r#"{"limit":10,"offset":20}"#).unwrap();
        assert_eq!(hook.limit(), Some(10));
        assert_eq!(hook.offset(), Some(20));

        let hook = translate(r#"{"where":{"id":1}}"#).unwrap();
        assert_eq!(hook.limit(), None);
        assert_eq!(hook.offset(), None);
    }

    // ========================================
    // PostgreSQL profile
    // ========================================

    #[test]
    fn test_postgres_operators() {
        let cases = [
            ("_similar", "SIMILAR TO"),
            ("_nsimilar", "NOT SIMILAR TO"),
            ("_regex", "~"),
            ("_nregex", "!~"),
            ("_iregex", "~*"),
            ("_niregex", "!~*"),
            ("_has_key", "?"),
            ("_nt_contains", ">>="),
            ("_nt_contained", "<<="),
        ];

        for (operator, sql) in cases {
            let filter = format!(r#"{{"where":{{"col":{{"{}":"x"}}}}}}"#, operator);
            let hook = translate_with(DialectConfig::postgres(), &filter).unwrap();
            assert_eq!(hook.where_clause(), format!("\"col\" {} $1", sql));
            assert_eq!(hook.params(), &[text("x")]);
        }
    }

    #[test]
    fn test_postgres_json_operators() {
        let hook = translate_with(
            DialectConfig::postgres(),
            r#"{"where":{"metadata":{"_contains":{"role":"admin"}}}}"#,
        )
        .unwrap();
        assert_eq!(hook.where_clause(), "\"metadata\" @> $1");
        assert_eq!(hook.params(), &[SqlValue::Json(r#"{"role":"admin"}"#.to_string())]);

        let hook = translate_with(
            DialectConfig::postgres(),
            r#"{"where":{"metadata":{"_has_keys_any":["role","age"]}}}"#,
        )
        .unwrap();
        assert_eq!(hook.where_clause(), "\"metadata\" ?| $1");
        assert_eq!(
            hook.params(),
            &[SqlValue::Array(vec![text("role"), text("age")])]
        );
    }

    #[test]
    fn test_postgres_aggregates_through_hook() {
        let hook = translate_with(
            DialectConfig::postgres(),
            r#"{"aggregate":{"count":"*","sum":"price","string_agg":{"field":"tags","separator":","}}}"#,
        )
        .unwrap();
        assert_eq!(
            hook.aggregates(),
            vec![
                "COUNT(*) AS count",
                "SUM(\"price\") AS sum_price",
                "STRING_AGG(\"tags\", ',') AS string_agg_tags"
            ]
        );
    }

    // ========================================
    // Hook state
    // ========================================

    #[test]
    fn test_default_hook_is_empty() {
        let hook = SqlParseHook::default();
        assert_eq!(hook.where_clause(), "");
        assert_eq!(hook.order_by_clause(), "");
        assert!(hook.params().is_empty());
        assert!(hook.aggregates().is_empty());
        assert_eq!(hook.dialect().name(), "ansi");
    }

    #[test]
    fn test_fresh_hooks_are_idempotent() {
        let filter = r#"{"where":{"_or":[{"a":1},{"b":{"_in":[1,2]}}]},"order_by":{"a":"desc"}}"#;
        let first = translate(filter).unwrap();
        let second = translate(filter).unwrap();

        assert_eq!(first.where_clause(), second.where_clause());
        assert_eq!(first.params(), second.params());
        assert_eq!(first.order_by_clause(), second.order_by_clause());
    }
}

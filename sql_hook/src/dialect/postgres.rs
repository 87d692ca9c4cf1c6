//! PostgreSQL operators and aggregates

use crate::dialect::ColumnNamer;
use crate::query_builder::aggregation::{
    AggregateExpr, AggregateExprBuilder, AggregateRequest, DefaultAggregateBuilder,
};
use inspector::FilterError;
use serde_json::Value;

/// Operators added on top of the ANSI table
pub const OPERATORS: &[(&str, &str)] = &[
    ("_similar", "SIMILAR TO"),
    ("_nsimilar", "NOT SIMILAR TO"),
    ("_regex", "~"),
    ("_nregex", "!~"),
    ("_iregex", "~*"),
    ("_niregex", "!~*"),
    // jsonb
    ("_contains", "@>"),
    ("_contained_in", "<@"),
    ("_has_key", "?"),
    ("_has_keys_any", "?|"),
    ("_has_keys_all", "?&"),
    // inet
    ("_nt_contains", ">>="),
    ("_nt_contained", "<<="),
];

/// Aggregates added on top of the ANSI table
pub const AGGREGATE_FUNCTIONS: &[(&str, &str)] = &[
    ("stddev_pop", "STDDEV_POP"),
    ("stddev_samp", "STDDEV_SAMP"),
    ("var_pop", "VAR_POP"),
    ("var_samp", "VAR_SAMP"),
    ("bool_and", "BOOL_AND"),
    ("bool_or", "BOOL_OR"),
    ("string_agg", "STRING_AGG"),
    ("array_agg", "ARRAY_AGG"),
    ("json_agg", "JSON_AGG"),
    ("jsonb_agg", "JSONB_AGG"),
    ("percentile_cont", "PERCENTILE_CONT"),
    ("percentile_disc", "PERCENTILE_DISC"),
    ("mode", "MODE"),
];

const DEFAULT_SEPARATOR: &str = ",";

/// Aggregate builder understanding PostgreSQL ordered-set and list aggregates
///
/// Recognised options:
/// - `distinct`: `string_agg`, `array_agg`, `json_agg`, `jsonb_agg` and the
///   standard aggregates
/// - `separator`: `string_agg`, defaults to `,`
/// - `order_by` / `direction`: ordering inside list aggregates
/// - `percentile` (0..=1) / `direction`: `percentile_cont`, `percentile_disc`
///
/// Any other function is rendered by [`DefaultAggregateBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresAggregateBuilder;

impl AggregateExprBuilder for PostgresAggregateBuilder {
    fn build(
        &self,
        request: &AggregateRequest<'_>,
        namer: &ColumnNamer<'_>,
    ) -> Result<AggregateExpr, FilterError> {
        match request.function {
            "string_agg" => string_agg(request, namer),
            "array_agg" | "json_agg" | "jsonb_agg" => list_agg(request, namer),
            "percentile_cont" | "percentile_disc" => percentile(request, namer),
            "mode" => mode(request, namer),
            _ => DefaultAggregateBuilder.build(request, namer),
        }
    }
}

fn distinct_prefix(request: &AggregateRequest<'_>) -> &'static str {
    if request.flag("distinct") {
        "DISTINCT "
    } else {
        ""
    }
}

/// ` ORDER BY col DIR` when an `order_by` option is present
fn order_suffix(
    request: &AggregateRequest<'_>,
    namer: &ColumnNamer<'_>,
) -> Result<String, FilterError> {
    match request.string_option("order_by")? {
        Some(column) if !column.trim().is_empty() => Ok(format!(
            " ORDER BY {} {}",
            namer.column(column, &[]),
            request.direction()?
        )),
        _ => Ok(String::new()),
    }
}

fn string_agg(
    request: &AggregateRequest<'_>,
    namer: &ColumnNamer<'_>,
) -> Result<AggregateExpr, FilterError> {
    request.require_field()?;

    let separator = request
        .string_option("separator")?
        .unwrap_or(DEFAULT_SEPARATOR)
        .replace('\'', "''");

    Ok(AggregateExpr::new(
        format!(
            "{}({}{}, '{}'{})",
            request.sql_function,
            distinct_prefix(request),
            namer.column(request.field, &[]),
            separator,
            order_suffix(request, namer)?
        ),
        request.alias(),
    ))
}

fn list_agg(
    request: &AggregateRequest<'_>,
    namer: &ColumnNamer<'_>,
) -> Result<AggregateExpr, FilterError> {
    request.require_field()?;

    Ok(AggregateExpr::new(
        format!(
            "{}({}{}{})",
            request.sql_function,
            distinct_prefix(request),
            namer.column(request.field, &[]),
            order_suffix(request, namer)?
        ),
        request.alias(),
    ))
}

fn percentile(
    request: &AggregateRequest<'_>,
    namer: &ColumnNamer<'_>,
) -> Result<AggregateExpr, FilterError> {
    request.require_field()?;

    let fraction = match request.option("percentile") {
        Some(Value::Number(number)) => number.as_f64(),
        _ => None,
    };
    let fraction = match fraction {
        Some(value) if (0.0..=1.0).contains(&value) => value,
        _ => {
            return Err(FilterError::InvalidPercentile {
                function: request.sql_function.to_string(),
                value: request
                    .option("percentile")
                    .map(Value::to_string)
                    .unwrap_or_else(|| "nothing".to_string()),
            });
        }
    };

    Ok(AggregateExpr::new(
        format!(
            "{}({}) WITHIN GROUP (ORDER BY {} {})",
            request.sql_function,
            fraction,
            namer.column(request.field, &[]),
            request.direction()?
        ),
        request.alias(),
    ))
}

fn mode(
    request: &AggregateRequest<'_>,
    namer: &ColumnNamer<'_>,
) -> Result<AggregateExpr, FilterError> {
    request.require_field()?;

    Ok(AggregateExpr::new(
        format!(
            "{}() WITHIN GROUP (ORDER BY {} {})",
            request.sql_function,
            namer.column(request.field, &[]),
            request.direction()?
        ),
        request.alias(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn render(
        function: &str,
        sql_function: &str,
        field: &str,
        options: Value,
    ) -> Result<AggregateExpr, FilterError> {
        let options: Option<Map<String, Value>> = match options {
            Value::Object(map) => Some(map),
            _ => None,
        };
        let request =
            AggregateRequest::new(function, sql_function, field).with_options(options.as_ref());
        PostgresAggregateBuilder.build(&request, &ColumnNamer::new("\""))
    }

    #[test]
    fn test_string_agg() {
        let expr = render(
            "string_agg",
            "STRING_AGG",
            "username",
            json!({"field": "username"}),
        )
        .unwrap();
        assert_eq!(expr.expr, "STRING_AGG(\"username\", ',')");
        assert_eq!(expr.alias, "string_agg_username");

        let expr = render(
            "string_agg",
            "STRING_AGG",
            "username",
            json!({"separator": ", ", "order_by": "created_at", "direction": "desc"}),
        )
        .unwrap();
        assert_eq!(
            expr.expr,
            "STRING_AGG(\"username\", ', ' ORDER BY \"created_at\" DESC)"
        );

        let expr = render(
            "string_agg",
            "STRING_AGG",
            "email",
            json!({"separator": ";", "order_by": "email"}),
        )
        .unwrap();
        assert_eq!(expr.expr, "STRING_AGG(\"email\", ';' ORDER BY \"email\" ASC)");
    }

    #[test]
    fn test_string_agg_escapes_separator() {
        let expr = render("string_agg", "STRING_AGG", "name", json!({"separator": "'"})).unwrap();
        assert_eq!(expr.expr, "STRING_AGG(\"name\", '''')");
    }

    #[test]
    fn test_list_aggregates() {
        let expr = render("array_agg", "ARRAY_AGG", "tags", Value::Null).unwrap();
        assert_eq!(expr.expr, "ARRAY_AGG(\"tags\")");

        let expr = render(
            "array_agg",
            "ARRAY_AGG",
            "status",
            json!({"distinct": true, "order_by": "status", "direction": "desc"}),
        )
        .unwrap();
        assert_eq!(expr.expr, "ARRAY_AGG(DISTINCT \"status\" ORDER BY \"status\" DESC)");

        let expr = render(
            "jsonb_agg",
            "JSONB_AGG",
            "metadata",
            json!({"order_by": "created_at"}),
        )
        .unwrap();
        assert_eq!(expr.expr, "JSONB_AGG(\"metadata\" ORDER BY \"created_at\" ASC)");
        assert_eq!(expr.alias, "jsonb_agg_metadata");
    }

    #[test]
    fn test_percentiles() {
        let expr = render(
            "percentile_cont",
            "PERCENTILE_CONT",
            "salary",
            json!({"percentile": 0.95}),
        )
        .unwrap();
        assert_eq!(
            expr.expr,
            "PERCENTILE_CONT(0.95) WITHIN GROUP (ORDER BY \"salary\" ASC)"
        );

        let expr = render(
            "percentile_disc",
            "PERCENTILE_DISC",
            "price",
            json!({"percentile": 1, "direction": "desc"}),
        )
        .unwrap();
        assert_eq!(
            expr.expr,
            "PERCENTILE_DISC(1) WITHIN GROUP (ORDER BY \"price\" DESC)"
        );

        let expr = render(
            "percentile_cont",
            "PERCENTILE_CONT",
            "salary",
            json!({"percentile": 0}),
        )
        .unwrap();
        assert!(expr.expr.starts_with("PERCENTILE_CONT(0) "));
    }

    #[test]
    fn test_percentile_out_of_range() {
        for percentile in [json!(1.5), json!(-0.1), json!("half")] {
            let err = render(
                "percentile_cont",
                "PERCENTILE_CONT",
                "salary",
                json!({ "percentile": percentile }),
            )
            .unwrap_err();
            assert!(err.to_string().contains("percentile between 0 and 1"));
        }

        let err = render("percentile_cont", "PERCENTILE_CONT", "salary", json!({})).unwrap_err();
        assert!(matches!(err, FilterError::InvalidPercentile { .. }));
    }

    #[test]
    fn test_mode() {
        let expr = render("mode", "MODE", "color", Value::Null).unwrap();
        assert_eq!(expr.expr, "MODE() WITHIN GROUP (ORDER BY \"color\" ASC)");
    }

    #[test]
    fn test_ordered_aggregates_need_a_field() {
        let err = render("string_agg", "STRING_AGG", "*", Value::Null).unwrap_err();
        assert!(matches!(err, FilterError::InvalidAggregateOption { .. }));

        let err = render("array_agg", "ARRAY_AGG", "*", json!({"order_by": "id"})).unwrap_err();
        assert!(matches!(err, FilterError::InvalidAggregateOption { .. }));
    }

    #[test]
    fn test_bad_options() {
        let err =
            render("string_agg", "STRING_AGG", "name", json!({"separator": 1})).unwrap_err();
        assert!(matches!(err, FilterError::InvalidAggregateOption { .. }));

        let err = render(
            "array_agg",
            "ARRAY_AGG",
            "name",
            json!({"order_by": "name", "direction": "up"}),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidOrderDirection(_)));
    }

    #[test]
    fn test_other_functions_use_default_builder() {
        let expr = render("stddev_pop", "STDDEV_POP", "score", Value::Null).unwrap();
        assert_eq!(expr.expr, "STDDEV_POP(\"score\")");
        assert_eq!(expr.alias, "stddev_pop_score");

        let expr = render("count", "COUNT", "*", Value::Null).unwrap();
        assert_eq!(expr.expr, "COUNT(*)");
    }
}

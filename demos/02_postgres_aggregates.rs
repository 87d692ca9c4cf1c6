//! # PostgreSQL Aggregates Example
//!
//! This example demonstrates:
//! - The PostgreSQL dialect (regex, jsonb operators, ordered aggregates)
//! - Adding operators and aggregates through `DialectSettings`
//! - A custom aggregate builder closure
//! - Binding the parameters onto an sqlx query
//!
//! No database connection is needed; the bound query is only printed.

use filterhaus::prelude::*;
use filterhaus::sql_hook::{DefaultAggregateBuilder, PostgresAggregateBuilder};
use sqlx::Execute;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🐘 FilterHaus PostgreSQL Aggregates Example");
    println!("===========================================");

    // 1. Dialect from settings
    let settings = DialectSettings::new(DialectProfile::Postgres)
        .with_operator("_is_distinct_from", "IS DISTINCT FROM")
        .with_aggregate_function("median", "PERCENTILE_CONT");
    let dialect = DialectConfig::from_settings(&settings)?;

    // 2. Render `median` as the 50th percentile, everything else as usual
    let dialect = dialect.with_aggregate_builder(
        |request: &AggregateRequest<'_>, namer: &ColumnNamer<'_>| -> Result<AggregateExpr, FilterError> {
            if request.function == "median" {
                request.require_field()?;
                return Ok(AggregateExpr::new(
                    format!(
                        "PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY {})",
                        namer.column(request.field, &[])
                    ),
                    request.alias(),
                ));
            }
            PostgresAggregateBuilder.build(request, namer)
        },
    );
    let haus = FilterHaus::new(dialect);

    let filter = r#"{
        "where": {
            "email": {"_iregex": "@example\\.com$"},
            "metadata": {"_contains": {"plan": "pro"}},
            "manager_id": {"_is_distinct_from": 7}
        },
        "aggregate": {
            "count": "*",
            "median": "salary",
            "percentile_disc": {"field": "salary", "percentile": 0.9},
            "string_agg": {"field": "name", "separator": ", ", "order_by": "name"}
        }
    }"#;

    let (sql, params) = haus.select(filter, "employees", &["department"])?;
    println!("\n{}", sql);
    for (index, param) in params.iter().enumerate() {
        println!("  ${} = {:?}", index + 1, param);
    }

    // 3. Bind onto sqlx
    let query = bind_params(sqlx::query(&sql), &params);
    println!("\nsqlx query ready: {} chars", query.sql().len());

    // 4. The default builder alone
    let plain = FilterHaus::new(
        DialectConfig::postgres().with_aggregate_builder(DefaultAggregateBuilder),
    );
    let builder = plain.translate(r#"{"aggregate": {"bool_and": "active"}}"#)?;
    println!("\nplain builder: {:?}", builder.aggregates());

    println!("\n✅ Done");
    Ok(())
}

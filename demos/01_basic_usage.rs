//! # Basic Usage Example
//!
//! This example demonstrates the fundamental concepts of FilterHaus:
//! - Translating a Hasura-style filter with the default ANSI dialect
//! - Reading the WHERE clause, parameters and ORDER BY separately
//! - Assembling a complete SELECT statement
//! - Watching the inspection events with a logging hook
//!
//! Run with `RUST_LOG=debug` to see every event.

use filterhaus::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🚀 FilterHaus Basic Usage Example");
    println!("=================================");

    let haus = FilterHaus::default();

    let filter = r#"{
        "where": {
            "_or": [
                {"age": {"_gte": 25}},
                {"role": "admin"}
            ],
            "profile": {"country": {"_in": ["NO", "SE", "DK"]}},
            "deleted_at": null
        },
        "order_by": [{"name": "asc"}, {"created_at": "desc"}],
        "limit": 10
    }"#;

    // 1. Translate into separate parts
    println!("\n📝 Step 1: Translate");
    println!("--------------------");
    let mut tracer = TracingHook::named("demo");
    let builder = haus.translate_with_hooks(filter, &mut [&mut tracer])?;

    println!("WHERE    {}", builder.where_clause());
    println!("PARAMS   {:?}", builder.params());
    println!("ORDER BY {}", builder.order_by_clause());
    println!("LIMIT    {:?}", builder.limit());
    println!("events   {}", tracer.events_seen());

    // 2. Full statement
    println!("\n🔨 Step 2: Build SELECT");
    println!("-----------------------");
    let (sql, params) = haus.select(filter, "users", &["id", "name", "age"])?;
    println!("{}", sql);
    println!("{} parameters", params.len());

    // 3. Errors carry the offending location
    println!("\n⚠️  Step 3: Errors");
    println!("------------------");
    match haus.translate(r#"{"order_by": {"name": "sideways"}}"#) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("rejected: {}", err),
    }

    println!("\n✅ Done");
    Ok(())
}

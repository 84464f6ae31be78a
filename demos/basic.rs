//! Basic example showing how to use sea-orm-sqlcommenter.
//!
//! Run with: cargo run --example basic

use sea_orm::Database;
use sea_orm_sqlcommenter::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber (dual-trace-source warnings land here)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sea_orm_sqlcommenter=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/test".into());

    tracing::info!("Connecting to database...");

    let db = Database::connect(&database_url).await?;

    // Option 1: Simple wrapping with defaults (framework trio enabled,
    // annotated only once a framework source is registered)
    let db = CommentedConnection::from(db);

    // Option 2: Using the extension trait (more fluent)
    // let db = db.with_sqlcommenter();

    // Option 3: With custom configuration
    // let db = db.with_sqlcommenter_config(
    //     CommenterConfig::default()
    //         .with_db_driver(true)
    //         .with_driver_paramstyle(true)
    // );

    // Option 4: Full control - custom sources for framework and trace context
    // let commenter = SqlCommenter::new(CommenterConfig::everything())
    //     .with_framework_source(|| Some(FrameworkInfo {
    //         framework: Some("axum".to_string()),
    //         controller: Some("get_users".to_string()),
    //         route: Some("/users".to_string()),
    //     }))
    //     .with_opentelemetry_source(|| current_trace_context());
    // let db = db.into_inner().with_commenter(commenter);

    // All queries through db now carry a trailing metadata comment:
    //
    // let users = Users::find()
    //     .filter(users::Column::Active.eq(true))
    //     .all(&db)
    //     .await?;
    //
    // arrives at the server as
    //     SELECT ... FROM "users" ... /*controller='get_users',framework='axum',route='/users'*/

    tracing::info!("Database connection established with sqlcommenter enabled");

    // You can also access the inner connection if needed
    let _inner = db.inner();

    Ok(())
}

//! # sea-orm-sqlcommenter
//!
//! sqlcommenter-style SQL comment annotation for SeaORM database operations.
//!
//! This crate appends a structured `/* ... */` comment to every query issued
//! through a wrapped connection, so slow-query logs on the database server
//! can be correlated back to the application code path that issued them:
//!
//! ```sql
//! SELECT "users".* FROM "users" /*controller='get_users',framework='axum',route='/users'*/
//! ```
//!
//! ## Features
//!
//! - **Drop-in Wrapper**: `CommentedConnection` implements the SeaORM
//!   connection traits and delegates everything except the comment append
//! - **Deterministic Output**: keys are sorted, values percent-encoded, so
//!   identical context always yields byte-identical comments
//! - **Injection Safe**: reserved characters (including `*` and `'`) are
//!   escaped; a value can never terminate the comment or the query
//! - **Per-Attribute Toggles**: each attribute category is opt-in/opt-out
//!   through `CommenterConfig`
//! - **Trace Correlation**: optionally carries `traceparent`/`tracestate`
//!   from an active distributed trace
//! - **Best Effort**: annotation never fails a query; missing context just
//!   means fewer attributes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sea_orm::Database;
//! use sea_orm_sqlcommenter::CommentedConnection;
//!
//! // Wrap your existing connection
//! let db = Database::connect("postgres://localhost/mydb").await?;
//! let db = CommentedConnection::from(db);
//!
//! // Use it exactly like a normal DatabaseConnection
//! let users = Users::find().all(&db).await?;
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! use sea_orm_sqlcommenter::{CommenterConfig, CommenterExt, SqlCommenter};
//!
//! let commenter = SqlCommenter::new(
//!     CommenterConfig::default()
//!         .with_db_driver(true)
//!         .with_opentelemetry(true),
//! )
//! .with_framework_source(|| current_request_info())
//! .with_opentelemetry_source(|| current_trace_context());
//!
//! let db = db.with_commenter(commenter);
//! ```
//!
//! ## Comment Attributes
//!
//! The following attribute keys can appear in the comment:
//!
//! | Attribute | Source | Default |
//! |-----------|--------|---------|
//! | `framework` | framework source | on |
//! | `controller` | framework source | on |
//! | `route` | framework source | on |
//! | `db_driver` | driver identity | off |
//! | `dbapi_threadsafety` | driver identity | off |
//! | `dbapi_level` | driver identity | off |
//! | `libpq_version` | driver identity | off |
//! | `driver_paramstyle` | driver identity | off |
//! | `traceparent` | trace source | off |
//! | `tracestate` | trace source | off |
//!
//! Keys always render in alphabetical order. String values are wrapped in
//! single quotes with reserved characters percent-encoded; numeric values
//! render bare. An empty attribute set leaves the query untouched.

mod attributes;
mod comment;
mod commenter;
mod config;
mod connection;
mod sources;

pub use attributes::{keys, AttributeSet, CommentValue};
pub use comment::{append_comment, generate_comment};
pub use commenter::{Annotated, CommenterWarning, SqlCommenter};
pub use config::CommenterConfig;
pub use connection::{CommentedConnection, CommenterExt};
pub use sources::{DriverInfo, FrameworkInfo, FrameworkSource, TraceContext, TraceSource};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CommentedConnection, CommenterConfig, CommenterExt, FrameworkInfo, SqlCommenter,
        TraceContext,
    };
}

//! Attribute sources: driver identity, framework context, and trace context.
//!
//! Each source supplies a subset of the attribute keys. Sources are plain
//! synchronous lookups and must never block; a source that has nothing to
//! report returns `None` and the corresponding attributes are omitted from
//! the comment. Fallibility is deliberately encoded in the return type so a
//! broken source can only ever degrade to "attribute omitted", never abort
//! the query path.

use sea_orm::DbBackend;

/// Static driver-identity attributes.
///
/// All fields are public so integrators can override what gets reported.
/// `DriverInfo::for_backend` picks defaults appropriate for the sqlx driver
/// SeaORM rides on.
///
/// # Example
///
/// ```rust
/// use sea_orm::DbBackend;
/// use sea_orm_sqlcommenter::DriverInfo;
///
/// let mut info = DriverInfo::for_backend(DbBackend::Postgres);
/// info.db_driver = "my-app-db-layer:2.1".to_string();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DriverInfo {
    /// Driver identifier and version, e.g. `sea-orm-sqlcommenter:0.1.0`.
    pub db_driver: String,

    /// Thread-sharing level of the connection handle. SeaORM connections are
    /// pooled and shareable across threads, which maps to level 3.
    pub dbapi_threadsafety: i64,

    /// API conformance level of the driver surface.
    pub dbapi_level: String,

    /// Version of the native client library, when one is linked.
    /// `None` for sqlx backends (pure Rust, no libpq), in which case the
    /// attribute is omitted even when its toggle is enabled.
    pub libpq_version: Option<i64>,

    /// Parameter-binding placeholder style: `numeric` for `$1` style,
    /// `qmark` for `?` style.
    pub driver_paramstyle: String,
}

impl DriverInfo {
    /// Build driver info with defaults matching the given backend.
    pub fn for_backend(backend: DbBackend) -> Self {
        let driver_paramstyle = match backend {
            DbBackend::Postgres => "numeric",
            DbBackend::MySql | DbBackend::Sqlite => "qmark",
        };

        Self {
            db_driver: format!("sea-orm-sqlcommenter:{}", env!("CARGO_PKG_VERSION")),
            dbapi_threadsafety: 3,
            dbapi_level: "2.0".to_string(),
            libpq_version: None,
            driver_paramstyle: driver_paramstyle.to_string(),
        }
    }
}

impl Default for DriverInfo {
    fn default() -> Self {
        Self::for_backend(DbBackend::Postgres)
    }
}

/// Web-framework context for the request currently issuing the query.
///
/// Any subset of the fields may be present; outside an active request a
/// source should return `None` from [`FrameworkSource::framework_info`]
/// instead of an empty struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameworkInfo {
    /// Framework identifier, e.g. `axum:0.7`.
    pub framework: Option<String>,
    /// Handler/controller name.
    pub controller: Option<String>,
    /// Matched route pattern, e.g. `/users/:id`.
    pub route: Option<String>,
}

/// Supplies [`FrameworkInfo`] for the current request, if any.
///
/// Implemented for any `Fn() -> Option<FrameworkInfo> + Send + Sync`, so a
/// closure reading task-local request state is enough:
///
/// ```rust
/// use sea_orm_sqlcommenter::FrameworkInfo;
///
/// let source = || {
///     Some(FrameworkInfo {
///         framework: Some("axum".to_string()),
///         controller: Some("get_users".to_string()),
///         route: Some("/users".to_string()),
///     })
/// };
/// ```
pub trait FrameworkSource: Send + Sync {
    fn framework_info(&self) -> Option<FrameworkInfo>;
}

impl<F> FrameworkSource for F
where
    F: Fn() -> Option<FrameworkInfo> + Send + Sync,
{
    fn framework_info(&self) -> Option<FrameworkInfo> {
        self()
    }
}

/// W3C-style trace identifiers for the active span, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceContext {
    /// `traceparent` header value, e.g. `00-<trace-id>-<span-id>-01`.
    pub traceparent: Option<String>,
    /// `tracestate` header value.
    pub tracestate: Option<String>,
}

/// Supplies the active [`TraceContext`], if a trace is in progress.
///
/// Two of these can be registered at once (an opencensus-style one and an
/// opentelemetry one) to ease migration; see
/// [`SqlCommenter`](crate::SqlCommenter) for the precedence rules.
pub trait TraceSource: Send + Sync {
    fn trace_context(&self) -> Option<TraceContext>;
}

impl<F> TraceSource for F
where
    F: Fn() -> Option<TraceContext> + Send + Sync,
{
    fn trace_context(&self) -> Option<TraceContext> {
        self()
    }
}

//! The attribute collector and the annotation entry point.

use std::fmt;

use crate::attributes::{keys, AttributeSet};
use crate::comment::append_comment;
use crate::config::CommenterConfig;
use crate::sources::{DriverInfo, FrameworkSource, TraceSource};

/// Non-fatal diagnostics produced while collecting attributes.
///
/// Warnings are returned to the caller instead of being logged from inside
/// the core, so the collector itself touches no global state. The connection
/// wrapper forwards them to `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommenterWarning {
    /// Both trace toggles are enabled; only one should be used. Collection
    /// proceeds and the opentelemetry source's values win on collision.
    DualTraceSources,
}

impl fmt::Display for CommenterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommenterWarning::DualTraceSources => write!(
                f,
                "opencensus and opentelemetry are both enabled. \
                 Only use one to avoid unexpected behavior"
            ),
        }
    }
}

/// An annotated query plus any diagnostics raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    /// The query text with the metadata comment appended (or the input
    /// unchanged when no attributes were collected).
    pub sql: String,
    /// Warnings raised during collection, at most one per kind.
    pub warnings: Vec<CommenterWarning>,
}

/// Collects attributes from the configured sources and appends them to SQL
/// text as a trailing comment.
///
/// A `SqlCommenter` is built once, next to the connection it annotates for,
/// and is safe to share across threads: annotation reads the immutable
/// configuration and builds a fresh [`AttributeSet`] per call, so concurrent
/// queries never observe each other's context.
///
/// # Example
///
/// ```rust
/// use sea_orm_sqlcommenter::{CommenterConfig, FrameworkInfo, SqlCommenter};
///
/// let commenter = SqlCommenter::new(CommenterConfig::default())
///     .with_framework_source(|| {
///         Some(FrameworkInfo {
///             framework: Some("axum".to_string()),
///             controller: Some("get_users".to_string()),
///             route: Some("/users".to_string()),
///         })
///     });
///
/// let annotated = commenter.annotate("SELECT 1;");
/// assert_eq!(
///     annotated.sql,
///     "SELECT 1; /*controller='get_users',framework='axum',route='/users'*/"
/// );
/// ```
pub struct SqlCommenter {
    config: CommenterConfig,
    driver: DriverInfo,
    framework: Option<Box<dyn FrameworkSource>>,
    opencensus: Option<Box<dyn TraceSource>>,
    opentelemetry: Option<Box<dyn TraceSource>>,
}

impl SqlCommenter {
    /// Create a commenter with the given configuration and default driver
    /// identity. No framework or trace sources are registered.
    pub fn new(config: CommenterConfig) -> Self {
        Self {
            config,
            driver: DriverInfo::default(),
            framework: None,
            opencensus: None,
            opentelemetry: None,
        }
    }

    /// Replace the reported driver identity.
    pub fn with_driver_info(mut self, driver: DriverInfo) -> Self {
        self.driver = driver;
        self
    }

    /// Register the source of `framework`/`controller`/`route` values.
    pub fn with_framework_source(mut self, source: impl FrameworkSource + 'static) -> Self {
        self.framework = Some(Box::new(source));
        self
    }

    /// Register the opencensus-style trace source.
    pub fn with_opencensus_source(mut self, source: impl TraceSource + 'static) -> Self {
        self.opencensus = Some(Box::new(source));
        self
    }

    /// Register the opentelemetry trace source.
    pub fn with_opentelemetry_source(mut self, source: impl TraceSource + 'static) -> Self {
        self.opentelemetry = Some(Box::new(source));
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &CommenterConfig {
        &self.config
    }

    /// The driver identity being reported.
    pub fn driver_info(&self) -> &DriverInfo {
        &self.driver
    }

    /// Annotate a query: collect attributes, serialize, append.
    ///
    /// Never fails and never alters the query text beyond appending one
    /// comment; an empty collection returns the input unchanged.
    pub fn annotate(&self, sql: &str) -> Annotated {
        let (attributes, warnings) = self.collect();
        Annotated {
            sql: append_comment(sql, &attributes),
            warnings,
        }
    }

    /// Gather attributes from every enabled source.
    ///
    /// Merge order is static driver info, then framework context, then the
    /// opencensus trace source, then the opentelemetry trace source; a later
    /// source overwrites earlier values for the same key. Each category is
    /// gated by its own toggle, so a disabled attribute stays out of the
    /// result no matter which source could have supplied it.
    pub fn collect(&self) -> (AttributeSet, Vec<CommenterWarning>) {
        let mut attributes = AttributeSet::new();
        let mut warnings = Vec::new();
        let config = &self.config;

        if config.db_driver {
            attributes.insert(keys::DB_DRIVER, self.driver.db_driver.as_str());
        }
        if config.dbapi_threadsafety {
            attributes.insert(keys::DBAPI_THREADSAFETY, self.driver.dbapi_threadsafety);
        }
        if config.dbapi_level {
            attributes.insert(keys::DBAPI_LEVEL, self.driver.dbapi_level.as_str());
        }
        if config.libpq_version {
            attributes.insert_opt(keys::LIBPQ_VERSION, self.driver.libpq_version);
        }
        if config.driver_paramstyle {
            attributes.insert(keys::DRIVER_PARAMSTYLE, self.driver.driver_paramstyle.as_str());
        }

        if config.framework || config.controller || config.route {
            if let Some(info) = self.framework.as_ref().and_then(|s| s.framework_info()) {
                if config.framework {
                    attributes.insert_opt(keys::FRAMEWORK, info.framework);
                }
                if config.controller {
                    attributes.insert_opt(keys::CONTROLLER, info.controller);
                }
                if config.route {
                    attributes.insert_opt(keys::ROUTE, info.route);
                }
            }
        }

        if config.opencensus && config.opentelemetry {
            warnings.push(CommenterWarning::DualTraceSources);
        }
        if config.opencensus {
            if let Some(ctx) = self.opencensus.as_ref().and_then(|s| s.trace_context()) {
                attributes.insert_opt(keys::TRACEPARENT, ctx.traceparent);
                attributes.insert_opt(keys::TRACESTATE, ctx.tracestate);
            }
        }
        if config.opentelemetry {
            if let Some(ctx) = self.opentelemetry.as_ref().and_then(|s| s.trace_context()) {
                attributes.insert_opt(keys::TRACEPARENT, ctx.traceparent);
                attributes.insert_opt(keys::TRACESTATE, ctx.tracestate);
            }
        }

        (attributes, warnings)
    }
}

impl fmt::Debug for SqlCommenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlCommenter")
            .field("config", &self.config)
            .field("driver", &self.driver)
            .field("framework", &self.framework.is_some())
            .field("opencensus", &self.opencensus.is_some())
            .field("opentelemetry", &self.opentelemetry.is_some())
            .finish()
    }
}

//! Configuration for comment annotation.

/// Per-category toggles deciding which attributes go into the SQL comment.
///
/// Constructed once and held immutably for the lifetime of the wrapping
/// connection; every query annotated through that connection sees the same
/// configuration.
///
/// # Example
///
/// ```rust
/// use sea_orm_sqlcommenter::CommenterConfig;
///
/// let config = CommenterConfig::default()
///     .with_db_driver(true)
///     .with_opentelemetry(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommenterConfig {
    /// Include the `framework` attribute from the framework source.
    /// Default: `true`
    pub framework: bool,

    /// Include the `controller` attribute from the framework source.
    /// Default: `true`
    pub controller: bool,

    /// Include the `route` attribute from the framework source.
    /// Default: `true`
    pub route: bool,

    /// Include the `db_driver` attribute.
    /// Default: `false`
    pub db_driver: bool,

    /// Include the `dbapi_threadsafety` attribute.
    /// Default: `false`
    pub dbapi_threadsafety: bool,

    /// Include the `dbapi_level` attribute.
    /// Default: `false`
    pub dbapi_level: bool,

    /// Include the `libpq_version` attribute (omitted anyway when the driver
    /// links no native client library).
    /// Default: `false`
    pub libpq_version: bool,

    /// Include the `driver_paramstyle` attribute.
    /// Default: `false`
    pub driver_paramstyle: bool,

    /// Pull `traceparent`/`tracestate` from the opencensus-style source.
    /// Default: `false` (trace identifiers are ephemeral, opt-in only)
    pub opencensus: bool,

    /// Pull `traceparent`/`tracestate` from the opentelemetry source.
    /// When both trace toggles are enabled, opentelemetry values win and a
    /// warning is emitted per annotated query.
    /// Default: `false`
    pub opentelemetry: bool,
}

impl Default for CommenterConfig {
    fn default() -> Self {
        Self {
            framework: true,
            controller: true,
            route: true,
            db_driver: false,
            dbapi_threadsafety: false,
            dbapi_level: false,
            libpq_version: false,
            driver_paramstyle: false,
            opencensus: false,
            opentelemetry: false,
        }
    }
}

impl CommenterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `framework` attribute.
    pub fn with_framework(mut self, enabled: bool) -> Self {
        self.framework = enabled;
        self
    }

    /// Enable or disable the `controller` attribute.
    pub fn with_controller(mut self, enabled: bool) -> Self {
        self.controller = enabled;
        self
    }

    /// Enable or disable the `route` attribute.
    pub fn with_route(mut self, enabled: bool) -> Self {
        self.route = enabled;
        self
    }

    /// Enable or disable the `db_driver` attribute.
    pub fn with_db_driver(mut self, enabled: bool) -> Self {
        self.db_driver = enabled;
        self
    }

    /// Enable or disable the `dbapi_threadsafety` attribute.
    pub fn with_dbapi_threadsafety(mut self, enabled: bool) -> Self {
        self.dbapi_threadsafety = enabled;
        self
    }

    /// Enable or disable the `dbapi_level` attribute.
    pub fn with_dbapi_level(mut self, enabled: bool) -> Self {
        self.dbapi_level = enabled;
        self
    }

    /// Enable or disable the `libpq_version` attribute.
    pub fn with_libpq_version(mut self, enabled: bool) -> Self {
        self.libpq_version = enabled;
        self
    }

    /// Enable or disable the `driver_paramstyle` attribute.
    pub fn with_driver_paramstyle(mut self, enabled: bool) -> Self {
        self.driver_paramstyle = enabled;
        self
    }

    /// Enable or disable opencensus-style trace attributes.
    pub fn with_opencensus(mut self, enabled: bool) -> Self {
        self.opencensus = enabled;
        self
    }

    /// Enable or disable opentelemetry trace attributes.
    pub fn with_opentelemetry(mut self, enabled: bool) -> Self {
        self.opentelemetry = enabled;
        self
    }

    /// Every attribute category enabled, with opentelemetry as the trace
    /// source. Useful in development to see the full comment.
    pub fn everything() -> Self {
        Self {
            framework: true,
            controller: true,
            route: true,
            db_driver: true,
            dbapi_threadsafety: true,
            dbapi_level: true,
            libpq_version: true,
            driver_paramstyle: true,
            opencensus: false,
            opentelemetry: true,
        }
    }

    /// Only the framework trio, nothing else. The smallest configuration
    /// that still correlates queries to application code paths.
    pub fn minimal() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toggles() {
        let config = CommenterConfig::default();
        assert!(config.framework);
        assert!(config.controller);
        assert!(config.route);
        assert!(!config.db_driver);
        assert!(!config.dbapi_threadsafety);
        assert!(!config.dbapi_level);
        assert!(!config.libpq_version);
        assert!(!config.driver_paramstyle);
        assert!(!config.opencensus);
        assert!(!config.opentelemetry);
    }

    #[test]
    fn test_builder() {
        let config = CommenterConfig::new()
            .with_framework(false)
            .with_db_driver(true)
            .with_opentelemetry(true);

        assert!(!config.framework);
        assert!(config.db_driver);
        assert!(config.opentelemetry);
    }

    #[test]
    fn test_everything_enables_all_static_attributes() {
        let config = CommenterConfig::everything();
        assert!(config.db_driver);
        assert!(config.driver_paramstyle);
        assert!(config.opentelemetry);
        assert!(!config.opencensus);
    }
}

//! Annotating database connection wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    ExecResult, IsolationLevel, QueryResult, Statement, StreamTrait, TransactionError,
    TransactionTrait,
};

use crate::commenter::SqlCommenter;
use crate::config::CommenterConfig;
use crate::sources::DriverInfo;

/// A wrapper around SeaORM's `DatabaseConnection` that appends a sqlcommenter
/// metadata comment to every outgoing statement.
///
/// This wrapper implements `ConnectionTrait`, `StreamTrait`, and
/// `TransactionTrait`, making it a drop-in replacement for
/// `DatabaseConnection`. The query text is only ever extended with one
/// trailing comment; execution, parameter binding, and results pass through
/// untouched.
///
/// # Example
///
/// ```rust,ignore
/// use sea_orm::Database;
/// use sea_orm_sqlcommenter::CommentedConnection;
///
/// let db = Database::connect("postgres://localhost/mydb").await?;
/// let db = CommentedConnection::from(db);
///
/// // Queries now arrive at the server as e.g.
/// // SELECT "users".* FROM "users" /*controller='get_users',framework='axum',route='/users'*/
/// let users = Users::find().all(&db).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CommentedConnection {
    inner: DatabaseConnection,
    commenter: Arc<SqlCommenter>,
}

impl CommentedConnection {
    /// Wrap a connection with an explicit commenter.
    pub fn new(connection: DatabaseConnection, commenter: SqlCommenter) -> Self {
        Self {
            inner: connection,
            commenter: Arc::new(commenter),
        }
    }

    /// Wrap a connection with the default configuration. Driver identity is
    /// derived from the connection's backend.
    pub fn wrap(connection: DatabaseConnection) -> Self {
        Self::with_config(connection, CommenterConfig::default())
    }

    /// Wrap a connection with the given configuration.
    pub fn with_config(connection: DatabaseConnection, config: CommenterConfig) -> Self {
        let driver = DriverInfo::for_backend(connection.get_database_backend());
        let commenter = SqlCommenter::new(config).with_driver_info(driver);
        Self::new(connection, commenter)
    }

    /// Get a reference to the underlying `DatabaseConnection`.
    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }

    /// Get the commenter used for annotation.
    pub fn commenter(&self) -> &SqlCommenter {
        &self.commenter
    }

    /// Consume the wrapper and return the inner `DatabaseConnection`.
    pub fn into_inner(self) -> DatabaseConnection {
        self.inner
    }

    /// Annotate a statement's SQL text, forwarding any collector warnings
    /// to the `tracing` subscriber. Annotation is best-effort and never
    /// fails the query path.
    fn annotate(&self, stmt: &mut Statement) {
        let annotated = self.commenter.annotate(&stmt.sql);
        for warning in &annotated.warnings {
            tracing::warn!("{}", warning);
        }
        stmt.sql = annotated.sql;
    }
}

impl From<DatabaseConnection> for CommentedConnection {
    fn from(connection: DatabaseConnection) -> Self {
        Self::wrap(connection)
    }
}

impl AsRef<DatabaseConnection> for CommentedConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

#[async_trait]
impl ConnectionTrait for CommentedConnection {
    fn get_database_backend(&self) -> DbBackend {
        self.inner.get_database_backend()
    }

    async fn execute(&self, mut stmt: Statement) -> Result<ExecResult, DbErr> {
        self.annotate(&mut stmt);
        self.inner.execute(stmt).await
    }

    async fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, DbErr> {
        let mut stmt = Statement::from_string(self.get_database_backend(), sql);
        self.annotate(&mut stmt);
        self.inner.execute_unprepared(&stmt.sql).await
    }

    async fn query_one(&self, mut stmt: Statement) -> Result<Option<QueryResult>, DbErr> {
        self.annotate(&mut stmt);
        self.inner.query_one(stmt).await
    }

    async fn query_all(&self, mut stmt: Statement) -> Result<Vec<QueryResult>, DbErr> {
        self.annotate(&mut stmt);
        self.inner.query_all(stmt).await
    }

    fn support_returning(&self) -> bool {
        self.inner.support_returning()
    }

    fn is_mock_connection(&self) -> bool {
        self.inner.is_mock_connection()
    }
}

#[async_trait]
impl StreamTrait for CommentedConnection {
    type Stream<'a> = <DatabaseConnection as StreamTrait>::Stream<'a>;

    fn stream<'a>(
        &'a self,
        mut stmt: Statement,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Stream<'a>, DbErr>> + 'a + Send>> {
        self.annotate(&mut stmt);
        self.inner.stream(stmt)
    }
}

// Transactions carry no statement text of their own, so BEGIN/COMMIT pass
// through unannotated. Statements issued inside a transaction go through the
// DatabaseTransaction handle directly and are not annotated; see the crate
// docs for the integration pattern.
#[async_trait]
impl TransactionTrait for CommentedConnection {
    async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.inner.begin().await
    }

    async fn begin_with_config(
        &self,
        isolation_level: Option<IsolationLevel>,
        access_mode: Option<AccessMode>,
    ) -> Result<DatabaseTransaction, DbErr> {
        self.inner.begin_with_config(isolation_level, access_mode).await
    }

    async fn transaction<F, T, E>(&self, callback: F) -> Result<T, TransactionError<E>>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
        T: Send,
        E: std::fmt::Display + std::fmt::Debug + Send,
    {
        self.inner.transaction(callback).await
    }

    async fn transaction_with_config<F, T, E>(
        &self,
        callback: F,
        isolation_level: Option<IsolationLevel>,
        access_mode: Option<AccessMode>,
    ) -> Result<T, TransactionError<E>>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
        T: Send,
        E: std::fmt::Display + std::fmt::Debug + Send,
    {
        self.inner
            .transaction_with_config(callback, isolation_level, access_mode)
            .await
    }
}

/// Extension trait for easy wrapping of database connections.
pub trait CommenterExt {
    /// Wrap this connection with default sqlcommenter annotation.
    fn with_sqlcommenter(self) -> CommentedConnection;

    /// Wrap this connection with a custom commenter configuration.
    fn with_sqlcommenter_config(self, config: CommenterConfig) -> CommentedConnection;

    /// Wrap this connection with a fully built commenter (custom sources,
    /// driver identity).
    fn with_commenter(self, commenter: SqlCommenter) -> CommentedConnection;
}

impl CommenterExt for DatabaseConnection {
    fn with_sqlcommenter(self) -> CommentedConnection {
        CommentedConnection::wrap(self)
    }

    fn with_sqlcommenter_config(self, config: CommenterConfig) -> CommentedConnection {
        CommentedConnection::with_config(self, config)
    }

    fn with_commenter(self, commenter: SqlCommenter) -> CommentedConnection {
        CommentedConnection::new(self, commenter)
    }
}

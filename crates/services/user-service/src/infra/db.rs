//! Database connection management.

use sea_orm::sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    ConnectOptions as _,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    RuntimeErr, SqlxSqliteConnector, Statement,
};

use common::DatabaseConfig;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

/// Pool settings for a private in-memory SQLite database.
///
/// The data lives only as long as its connection, so the pool holds exactly
/// one connection and never reaps or recycles it.
pub(crate) fn in_memory_pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

impl Database {
    /// Open a connection pool for the configured URL.
    ///
    /// Schema creation is left to the repository's startup phase.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let connection = if config.is_in_memory() {
            Self::connect_in_memory(&config.url).await?
        } else {
            let mut options = ConnectOptions::new(config.url.clone());
            options
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .sqlx_logging(false);

            SeaDatabase::connect(options).await?
        };

        tracing::info!(
            backend = ?connection.get_database_backend(),
            in_memory = config.is_in_memory(),
            "Database connected"
        );

        Ok(Self { connection })
    }

    async fn connect_in_memory(url: &str) -> Result<DatabaseConnection, DbErr> {
        let options = url
            .parse::<SqliteConnectOptions>()
            .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?
            .disable_statement_logging();

        let pool = in_memory_pool_options()
            .connect_with(options)
            .await
            .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

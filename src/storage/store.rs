//! Item store
//!
//! Owns the connection pool. Constructed once at process start, handed to the
//! HTTP layer through application state, and closed at shutdown.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, TransactionTrait,
};
use tracing::info;

use super::errors::{StoreError, StoreResult};
use super::repository::ItemRepository;
use super::session::StoreSession;

/// Handle to the backing database
#[derive(Debug, Clone)]
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    /// Opens a connection pool for the given database URL.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be reached.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(max_connections)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!(
            backend = ?db.get_database_backend(),
            max_connections,
            "Item store connected"
        );

        Ok(Self { db })
    }

    /// Creates the `items` table if it does not exist.
    ///
    /// Ids come from a sequence that never hands out a value twice, even
    /// after the newest row is deleted.
    pub async fn bootstrap(&self) -> StoreResult<()> {
        let backend = self.db.get_database_backend();
        self.db.execute_unprepared(create_table_sql(backend)).await?;
        info!(?backend, "Items table ready");
        Ok(())
    }

    /// Begins a request-scoped session.
    ///
    /// The session rolls back and releases its connection when dropped
    /// without [`StoreSession::commit`].
    pub async fn session(&self) -> StoreResult<StoreSession> {
        let txn = self.db.begin().await?;
        Ok(StoreSession::new(txn))
    }

    /// Repository running each statement directly on the pool
    pub fn items(&self) -> ItemRepository<'_, DatabaseConnection> {
        ItemRepository::new(&self.db)
    }

    /// Checks that the database answers
    pub async fn ping(&self) -> StoreResult<()> {
        self.db.ping().await?;
        Ok(())
    }

    /// Closes the pool. Other clones of this store become unusable.
    pub async fn close(self) -> StoreResult<()> {
        self.db.close().await?;
        info!("Item store closed");
        Ok(())
    }
}

fn create_table_sql(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Sqlite => {
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                done BOOLEAN NOT NULL DEFAULT FALSE
            )"
        }
        DbBackend::Postgres => {
            "CREATE TABLE IF NOT EXISTS items (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                done BOOLEAN NOT NULL DEFAULT FALSE
            )"
        }
        DbBackend::MySql => {
            "CREATE TABLE IF NOT EXISTS items (
                id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                done BOOLEAN NOT NULL DEFAULT FALSE
            )"
        }
    }
}

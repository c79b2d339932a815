//! Process-wide storage client.
//!
//! The connection pool is created on first use and then shared by every request.
//! Without a connection string no connection work is ever attempted.

use sqlx::SqlitePool;
use tokio::sync::OnceCell;

use crate::db::{self, Repository};

/// Why the storage handle could not be produced.
#[derive(Debug)]
pub enum StorageError {
    /// No connection string configured
    NotConfigured,
    /// Connecting or provisioning the collections failed
    Connect(sqlx::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotConfigured => write!(f, "storage is not configured"),
            StorageError::Connect(e) => write!(f, "storage connection failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Lazily-connected handle to the document store.
#[derive(Debug)]
pub struct StorageClient {
    url: Option<String>,
    pool: OnceCell<SqlitePool>,
}

impl StorageClient {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            pool: OnceCell::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Whether the pool has been established.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Get the shared pool, connecting on first call.
    ///
    /// Concurrent first callers wait on the same initialization. A failed attempt is
    /// not memoized, so the next call connects again.
    pub async fn pool(&self) -> Result<&SqlitePool, StorageError> {
        let Some(url) = self.url.as_deref() else {
            return Err(StorageError::NotConfigured);
        };

        self.pool
            .get_or_try_init(|| async {
                tracing::info!("Connecting to storage");
                db::init_database(url).await
            })
            .await
            .map_err(StorageError::Connect)
    }

    /// Get a repository over the shared pool.
    pub async fn repository(&self) -> Result<Repository, StorageError> {
        let pool = self.pool().await?;
        Ok(Repository::new(pool.clone()))
    }
}

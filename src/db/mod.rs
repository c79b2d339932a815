//! Database module for the document collections.
//!
//! Each collection is one SQLite table; nested documents are kept as JSON text.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open the connection pool and make sure the collections exist.
pub async fn init_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    ensure_collections(&pool).await?;

    Ok(pool)
}

/// Create the collections if they don't exist.
async fn ensure_collections(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin_documents (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            last_updated TEXT NOT NULL,
            last_updated_by TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS document_edits (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            document_id TEXT NOT NULL,
            username TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            discord_id TEXT PRIMARY KEY,
            name TEXT,
            email TEXT,
            joined_since TEXT,
            servers TEXT NOT NULL DEFAULT '[]'
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_document_edits_timestamp ON document_edits(timestamp);")
        .execute(pool)
        .await?;

    Ok(())
}

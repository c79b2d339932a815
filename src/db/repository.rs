//! Database repository for the document and user collections.

use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Document, EditLogEntry, ServerConfig, User};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== Document Operations ====================

    /// Get a document by id.
    pub async fn find_document(&self, id: &str) -> Result<Option<Document>, AppError> {
        let row = sqlx::query(
            "SELECT id, content, last_updated, last_updated_by FROM admin_documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Document {
            id: row.get("id"),
            content: row.get("content"),
            last_updated: row.get("last_updated"),
            last_updated_by: row.get("last_updated_by"),
        }))
    }

    /// Insert a document unless one with the same id already exists.
    pub async fn insert_document_if_absent(&self, document: &Document) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO admin_documents (id, content, last_updated, last_updated_by)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&document.id)
        .bind(&document.content)
        .bind(&document.last_updated)
        .bind(&document.last_updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite a document's content, creating it if needed.
    pub async fn upsert_document(&self, document: &Document) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO admin_documents (id, content, last_updated, last_updated_by)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                last_updated = excluded.last_updated,
                last_updated_by = excluded.last_updated_by
            "#,
        )
        .bind(&document.id)
        .bind(&document.content)
        .bind(&document.last_updated)
        .bind(&document.last_updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append one entry to the edit log.
    pub async fn append_edit(&self, entry: &EditLogEntry) -> Result<(), AppError> {
        sqlx::query("INSERT INTO document_edits (document_id, username, timestamp) VALUES (?, ?, ?)")
            .bind(&entry.document_id)
            .bind(&entry.username)
            .bind(&entry.timestamp)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Usernames of the most recent edits, newest first.
    pub async fn recent_editors(&self, limit: i64) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query(
            "SELECT username FROM document_edits ORDER BY timestamp DESC, seq DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("username")).collect())
    }

    // ==================== User Operations ====================

    /// Get a user by Discord id.
    pub async fn find_user(&self, discord_id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT discord_id, name, email, joined_since, servers FROM users WHERE discord_id = ?",
        )
        .bind(discord_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let discord_id: String = row.get("discord_id");
        let servers: Option<String> = row.get("servers");
        let servers: Vec<Value> = match servers {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        // A malformed entry must not hide the user's other servers
        let servers = servers
            .into_iter()
            .enumerate()
            .filter_map(|(index, server)| match server {
                Value::Object(map) => Some(ServerConfig(map)),
                _ => {
                    tracing::warn!(
                        discord_id = %discord_id,
                        index,
                        "Skipping server entry that is not an object"
                    );
                    None
                }
            })
            .collect();

        Ok(Some(User {
            discord_id,
            name: row.get("name"),
            email: row.get("email"),
            joined_since: row.get("joined_since"),
            servers,
        }))
    }

    /// Replace the first server entry matching `server_id` in one user's list.
    ///
    /// Runs as a single statement, so the read of the array and the write are atomic.
    /// Returns the number of modified user records: 0 when the user or the server
    /// entry does not exist.
    pub async fn replace_server_config(
        &self,
        discord_id: &str,
        server_id: &str,
        server: &ServerConfig,
    ) -> Result<u64, AppError> {
        let payload = serde_json::to_string(server)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET servers = json_set(
                servers,
                '$[' || (
                    SELECT key FROM json_each(users.servers)
                    WHERE json_extract(value, '$.server_id') = ?2
                    ORDER BY key
                    LIMIT 1
                ) || ']',
                json(?3)
            )
            WHERE discord_id = ?1
              AND EXISTS (
                  SELECT 1 FROM json_each(users.servers)
                  WHERE json_extract(value, '$.server_id') = ?2
              )
            "#,
        )
        .bind(discord_id)
        .bind(server_id)
        .bind(&payload)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

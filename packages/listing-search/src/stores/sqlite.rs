//! SQLite stage result store.
//!
//! Realizes the single `(id TEXT PRIMARY KEY, data TEXT)` table the
//! pipeline needs. Good for local development and single-server
//! deployments where a caller retrieves the final result out of
//! process.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use uuid::Uuid;

use crate::error::{Result, SearchError};
use crate::traits::store::ResultStore;

/// SQLite-backed stage result store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://./results.db?mode=rwc` - File-based, create if not exists
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| SearchError::storage(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS stage_results (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SearchError::storage(e.to_string()))?;

        Ok(())
    }

    async fn insert(&self, id: Uuid, value: &Value) -> Result<()> {
        let data = serde_json::to_string(value)?;
        sqlx::query("INSERT OR REPLACE INTO stage_results (id, data) VALUES (?, ?)")
            .bind(id.to_string())
            .bind(data)
            .execute(&self.pool)
            .await
            .map_err(|e| SearchError::storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ResultStore for SqliteStore {
    async fn put(&self, value: &Value) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.insert(id, value).await?;
        Ok(id)
    }

    async fn put_with_id(&self, id: Uuid, value: &Value) -> Result<()> {
        self.insert(id, value).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Value>> {
        let row = sqlx::query("SELECT data FROM stage_results WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SearchError::storage(e.to_string()))?;

        match row {
            Some(row) => {
                let data: String = row
                    .try_get("data")
                    .map_err(|e| SearchError::storage(e.to_string()))?;
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = SqliteStore::in_memory().await.unwrap();
        let value = json!({"scores": {"https://example.com/rooms/1": 5}});

        let id = store.put(&value).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().unwrap(), value);
    }

    #[tokio::test]
    async fn missing_id_resolves_to_none() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use tutor_core::model::CompletionMap;

use super::SqliteRepository;
use crate::codec::{decode_completion, encode_completion};
use crate::repository::{CompletionRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl CompletionRepository for SqliteRepository {
    async fn load_completion(&self, key: &str) -> Result<Option<CompletionMap>, StorageError> {
        let row = sqlx::query("SELECT value FROM progress_slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        decode_completion(&raw)
    }

    async fn save_completion(&self, key: &str, map: &CompletionMap) -> Result<(), StorageError> {
        let encoded = encode_completion(map)?;

        sqlx::query(
            r"
            INSERT INTO progress_slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(encoded)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear_completion(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress_slots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}

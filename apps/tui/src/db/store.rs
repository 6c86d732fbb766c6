use chrono::Utc;
use interview_backdrop::store::decode_stored;
use interview_backdrop::StoreError;
use serde::Serialize;
use serde_json::Value;
use sqlx::{query, query_scalar, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for KvError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store(StoreError::Encode(err))
    }
}

/// JSON values under string keys in the `kv_store` table, with the same
/// semantics as the browser's `localStorage` wrapper.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, KvError> {
        let value = query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    pub async fn set_raw(&self, key: &str, value: &str) -> Result<(), KvError> {
        query(
            "INSERT INTO kv_store (key, value, updated) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<(), KvError> {
        query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let encoded = serde_json::to_string(value)?;
        self.set_raw(key, &encoded).await
    }

    /// Missing keys load as `Null`; text that isn't JSON loads as a string.
    pub async fn load(&self, key: &str) -> Result<Value, KvError> {
        Ok(self
            .get_raw(key)
            .await?
            .map_or(Value::Null, decode_stored))
    }

    pub async fn clear_keys<K: AsRef<str>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<(), KvError> {
        for key in keys {
            self.remove(key.as_ref()).await?;
        }
        Ok(())
    }
}

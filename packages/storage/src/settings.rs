// ABOUTME: Per-user key/value settings storage
// ABOUTME: Values are arbitrary JSON documents stored as text

use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::StorageResult;

pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns `None` when the key has never been written for this user
    pub async fn get(&self, user_id: &str, key: &str) -> StorageResult<Option<Value>> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE user_id = ? AND key = ?")
                .bind(user_id)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, user_id: &str, key: &str, value: &Value) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (user_id, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(serde_json::to_string(value)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

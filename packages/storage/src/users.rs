// ABOUTME: User account storage
// ABOUTME: Emails are normalized to lowercase and unique case-insensitively

use chrono::{DateTime, Utc};
use dayboard_core::{generate_id, User};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

use crate::{StorageError, StorageResult};

/// A user row including the credential hash. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> StorageResult<UserRecord> {
        let email = email.trim().to_lowercase();

        if self.get_by_email(&email).await?.is_some() {
            return Err(StorageError::DuplicateEmail(email));
        }

        let record = UserRecord {
            id: generate_id("user"),
            email,
            name: name.trim().to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.name)
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            // Lost a race with a concurrent registration
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(StorageError::DuplicateEmail(record.email));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Created user {} ({})", record.id, record.email);
        Ok(record)
    }

    pub async fn get_by_email(&self, email: &str) -> StorageResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ? COLLATE NOCASE")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn get(&self, id: &str) -> StorageResult<User> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row_to_user(&row)?.to_user())
    }
}

fn row_to_user(row: &SqliteRow) -> StorageResult<UserRecord> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

// ABOUTME: Useful link storage layer using SQLite

use dayboard_core::UsefulLink;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{StorageError, StorageResult};

pub struct LinkStorage {
    pool: SqlitePool,
}

impl LinkStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<UsefulLink>> {
        let rows = sqlx::query(
            "SELECT * FROM useful_links WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_link).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<UsefulLink> {
        let row = sqlx::query("SELECT * FROM useful_links WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row_to_link(&row)
    }

    pub async fn upsert(&self, user_id: &str, link: &UsefulLink) -> StorageResult<UsefulLink> {
        let result = sqlx::query(
            r#"
            INSERT INTO useful_links (id, user_id, title, url, category, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                url = excluded.url,
                category = excluded.category,
                description = excluded.description,
                created_at = excluded.created_at
            WHERE useful_links.user_id = excluded.user_id
            "#,
        )
        .bind(&link.id)
        .bind(user_id)
        .bind(&link.title)
        .bind(&link.url)
        .bind(&link.category)
        .bind(&link.description)
        .bind(link.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &link.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM useful_links WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

fn row_to_link(row: &SqliteRow) -> StorageResult<UsefulLink> {
    Ok(UsefulLink {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        url: row.try_get("url")?,
        category: row.try_get("category")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

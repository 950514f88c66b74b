// ABOUTME: Highlight storage layer using SQLite

use dayboard_core::Highlight;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::codec::{flag_column, to_flag};
use crate::{StorageError, StorageResult};

pub struct HighlightStorage {
    pool: SqlitePool,
}

impl HighlightStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<Highlight>> {
        let rows = sqlx::query(
            "SELECT * FROM highlights WHERE user_id = ? ORDER BY date DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_highlight).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<Highlight> {
        let row = sqlx::query("SELECT * FROM highlights WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row_to_highlight(&row)
    }

    pub async fn upsert(&self, user_id: &str, highlight: &Highlight) -> StorageResult<Highlight> {
        debug!("Saving highlight: {}", highlight.id);

        let result = sqlx::query(
            r#"
            INSERT INTO highlights (
                id, user_id, content, impact, date, needs_follow_up, follow_up_context, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                impact = excluded.impact,
                date = excluded.date,
                needs_follow_up = excluded.needs_follow_up,
                follow_up_context = excluded.follow_up_context,
                created_at = excluded.created_at
            WHERE highlights.user_id = excluded.user_id
            "#,
        )
        .bind(&highlight.id)
        .bind(user_id)
        .bind(&highlight.content)
        .bind(&highlight.impact)
        .bind(highlight.date)
        .bind(to_flag(highlight.needs_follow_up))
        .bind(&highlight.follow_up_context)
        .bind(highlight.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &highlight.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM highlights WHERE id = ? AND user_id = ?")
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

fn row_to_highlight(row: &SqliteRow) -> StorageResult<Highlight> {
    Ok(Highlight {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        impact: row.try_get("impact")?,
        date: row.try_get("date")?,
        needs_follow_up: flag_column(row, "needs_follow_up")?,
        follow_up_context: row.try_get("follow_up_context")?,
        created_at: row.try_get("created_at")?,
    })
}

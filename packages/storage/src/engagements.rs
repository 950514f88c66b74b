// ABOUTME: Engagement storage layer using SQLite
// ABOUTME: Timeline entries and files are embedded JSON blobs on the engagement row

use dayboard_core::Engagement;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::codec::{blob_column, encode_blob, enum_column};
use crate::{StorageError, StorageResult};

pub struct EngagementStorage {
    pool: SqlitePool,
}

impl EngagementStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<Engagement>> {
        debug!("Fetching engagements for user: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM engagements WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_engagement).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<Engagement> {
        let row = sqlx::query("SELECT * FROM engagements WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row_to_engagement(&row)
    }

    /// Insert or replace the whole engagement, including embedded blobs
    pub async fn upsert(
        &self,
        user_id: &str,
        engagement: &Engagement,
    ) -> StorageResult<Engagement> {
        debug!("Saving engagement: {}", engagement.id);

        let result = sqlx::query(
            r#"
            INSERT INTO engagements (
                id, user_id, engagement_number, org_id, account_name, name, status,
                timeline, files, ai_summary, last_summary_date, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                engagement_number = excluded.engagement_number,
                org_id = excluded.org_id,
                account_name = excluded.account_name,
                name = excluded.name,
                status = excluded.status,
                timeline = excluded.timeline,
                files = excluded.files,
                ai_summary = excluded.ai_summary,
                last_summary_date = excluded.last_summary_date,
                created_at = excluded.created_at
            WHERE engagements.user_id = excluded.user_id
            "#,
        )
        .bind(&engagement.id)
        .bind(user_id)
        .bind(&engagement.engagement_number)
        .bind(&engagement.org_id)
        .bind(&engagement.account_name)
        .bind(&engagement.name)
        .bind(engagement.status.as_str())
        .bind(encode_blob(&engagement.timeline)?)
        .bind(encode_blob(&engagement.files)?)
        .bind(&engagement.ai_summary)
        .bind(engagement.last_summary_date)
        .bind(engagement.created_at)
        .execute(&self.pool)
        .await?;

        // Zero rows means the id exists but belongs to someone else
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &engagement.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        debug!("Deleting engagement: {}", id);

        let result = sqlx::query("DELETE FROM engagements WHERE id = ? AND user_id = ?")
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

fn row_to_engagement(row: &SqliteRow) -> StorageResult<Engagement> {
    Ok(Engagement {
        id: row.try_get("id")?,
        engagement_number: row.try_get("engagement_number")?,
        org_id: row.try_get("org_id")?,
        account_name: row.try_get("account_name")?,
        name: row.try_get("name")?,
        status: enum_column(row, "status")?,
        timeline: blob_column(row, "timeline")?,
        files: blob_column(row, "files")?,
        ai_summary: row.try_get("ai_summary")?,
        last_summary_date: row.try_get("last_summary_date")?,
        created_at: row.try_get("created_at")?,
    })
}

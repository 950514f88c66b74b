// ABOUTME: Calendar event storage layer using SQLite

use dayboard_core::CalendarEvent;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::codec::{enum_column, flag_column, to_flag};
use crate::{StorageError, StorageResult};

pub struct EventStorage {
    pool: SqlitePool,
}

impl EventStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<CalendarEvent>> {
        let rows = sqlx::query(
            "SELECT * FROM calendar_events WHERE user_id = ? ORDER BY date, start_time",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_event).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<CalendarEvent> {
        let row = sqlx::query("SELECT * FROM calendar_events WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row_to_event(&row)
    }

    pub async fn upsert(
        &self,
        user_id: &str,
        event: &CalendarEvent,
    ) -> StorageResult<CalendarEvent> {
        debug!("Saving calendar event: {}", event.id);

        let result = sqlx::query(
            r#"
            INSERT INTO calendar_events (
                id, user_id, title, description, date, start_time, end_time,
                type, meeting_notes, mom_sent
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                date = excluded.date,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                type = excluded.type,
                meeting_notes = excluded.meeting_notes,
                mom_sent = excluded.mom_sent
            WHERE calendar_events.user_id = excluded.user_id
            "#,
        )
        .bind(&event.id)
        .bind(user_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.start_time)
        .bind(&event.end_time)
        .bind(event.kind.as_str())
        .bind(&event.meeting_notes)
        .bind(to_flag(event.mom_sent))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &event.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = ? AND user_id = ?")
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

fn row_to_event(row: &SqliteRow) -> StorageResult<CalendarEvent> {
    Ok(CalendarEvent {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        date: row.try_get("date")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        kind: enum_column(row, "type")?,
        meeting_notes: row.try_get("meeting_notes")?,
        mom_sent: flag_column(row, "mom_sent")?,
    })
}

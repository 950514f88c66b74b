// ABOUTME: Note storage layer using SQLite
// ABOUTME: Tags are stored as a JSON array blob

use dayboard_core::Note;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::codec::{blob_column, encode_blob};
use crate::{StorageError, StorageResult};

pub struct NoteStorage {
    pool: SqlitePool,
}

impl NoteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<Note>> {
        let rows = sqlx::query("SELECT * FROM notes WHERE user_id = ? ORDER BY updated_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_note).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<Note> {
        let row = sqlx::query("SELECT * FROM notes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row_to_note(&row)
    }

    pub async fn upsert(&self, user_id: &str, note: &Note) -> StorageResult<Note> {
        let result = sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, title, content, tags, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                tags = excluded.tags,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            WHERE notes.user_id = excluded.user_id
            "#,
        )
        .bind(&note.id)
        .bind(user_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(encode_blob(&note.tags)?)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &note.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
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

fn row_to_note(row: &SqliteRow) -> StorageResult<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        tags: blob_column(row, "tags")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// ABOUTME: Task storage layer using SQLite
// ABOUTME: Standalone tasks only; project tasks live in the project aggregate

use chrono::NaiveDate;
use dayboard_core::{Task, TaskType};
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use crate::codec::{blob_column, encode_blob, enum_column, flag_column, to_flag};
use crate::{StorageError, StorageResult};

/// Optional narrowing for task listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<TaskType>,
}

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str, filter: &TaskFilter) -> StorageResult<Vec<Task>> {
        debug!("Fetching tasks for user: {} ({:?})", user_id, filter);

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM tasks WHERE user_id = ");
        query.push_bind(user_id);

        if let Some(date) = filter.date {
            query.push(" AND date = ").push_bind(date);
        }
        if let Some(kind) = filter.kind {
            query.push(" AND type = ").push_bind(kind.as_str());
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_task).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<Task> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row_to_task(&row)
    }

    pub async fn upsert(&self, user_id: &str, task: &Task) -> StorageResult<Task> {
        debug!("Saving task: {}", task.id);

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (
                id, user_id, content, is_completed, type, date, created_at,
                is_priority, subtasks, engagement_id, engagement_name,
                project_id, project_name
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                is_completed = excluded.is_completed,
                type = excluded.type,
                date = excluded.date,
                created_at = excluded.created_at,
                is_priority = excluded.is_priority,
                subtasks = excluded.subtasks,
                engagement_id = excluded.engagement_id,
                engagement_name = excluded.engagement_name,
                project_id = excluded.project_id,
                project_name = excluded.project_name
            WHERE tasks.user_id = excluded.user_id
            "#,
        )
        .bind(&task.id)
        .bind(user_id)
        .bind(&task.content)
        .bind(to_flag(task.is_completed))
        .bind(task.kind.as_str())
        .bind(task.date)
        .bind(task.created_at)
        .bind(to_flag(task.is_priority))
        .bind(encode_blob(&task.subtasks)?)
        .bind(&task.engagement_id)
        .bind(&task.engagement_name)
        .bind(&task.project_id)
        .bind(&task.project_name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &task.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        debug!("Deleting task: {}", id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
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

fn row_to_task(row: &SqliteRow) -> StorageResult<Task> {
    Ok(Task {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        is_completed: flag_column(row, "is_completed")?,
        kind: enum_column(row, "type")?,
        date: row.try_get("date")?,
        created_at: row.try_get("created_at")?,
        is_priority: flag_column(row, "is_priority")?,
        subtasks: blob_column(row, "subtasks")?,
        engagement_id: row.try_get("engagement_id")?,
        engagement_name: row.try_get("engagement_name")?,
        project_id: row.try_get("project_id")?,
        project_name: row.try_get("project_name")?,
    })
}

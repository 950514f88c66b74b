// ABOUTME: Internal project storage: parent row plus project_tasks and research_notes children
// ABOUTME: Every save deletes all children and reinserts the submitted arrays in one transaction

use dayboard_core::{InternalProject, ProjectTask, ResearchNote};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::codec::{enum_column, flag_column, to_flag};
use crate::{StorageError, StorageResult};

pub struct ProjectStorage {
    pool: SqlitePool,
}

impl ProjectStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<InternalProject>> {
        debug!("Fetching projects for user: {}", user_id);

        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query("SELECT * FROM projects WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            let mut project = row_to_project(&row)?;
            load_children(&mut conn, &mut project).await?;
            projects.push(project);
        }
        Ok(projects)
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<InternalProject> {
        let mut conn = self.pool.acquire().await?;
        fetch_project(&mut conn, user_id, id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Save the aggregate. Children not present in `project` are removed.
    ///
    /// Two editors saving stale copies will overwrite each other's children;
    /// callers are expected to be the single active editor of a project.
    pub async fn upsert(
        &self,
        user_id: &str,
        project: &InternalProject,
    ) -> StorageResult<InternalProject> {
        debug!(
            "Saving project: {} ({} tasks, {} notes)",
            project.id,
            project.tasks.len(),
            project.research_notes.len()
        );

        let mut tx = self.pool.begin().await?;
        write_project(&mut tx, user_id, project).await?;
        let saved = fetch_project(&mut tx, user_id, &project.id)
            .await?
            .ok_or(StorageError::NotFound)?;
        tx.commit().await?;

        Ok(saved)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        debug!("Deleting project: {}", id);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        delete_children(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Upsert the parent row, then replace every child row. Runs on the caller's
/// connection so it can join a larger transaction.
pub(crate) async fn write_project(
    conn: &mut SqliteConnection,
    user_id: &str,
    project: &InternalProject,
) -> StorageResult<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO projects (
            id, user_id, name, description, status, start_date, due_date, created_at,
            source_idea_id, source_idea_title, source_engagement_id, source_engagement_name
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            status = excluded.status,
            start_date = excluded.start_date,
            due_date = excluded.due_date,
            created_at = excluded.created_at,
            source_idea_id = excluded.source_idea_id,
            source_idea_title = excluded.source_idea_title,
            source_engagement_id = excluded.source_engagement_id,
            source_engagement_name = excluded.source_engagement_name
        WHERE projects.user_id = excluded.user_id
        "#,
    )
    .bind(&project.id)
    .bind(user_id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(project.status.as_str())
    .bind(project.start_date)
    .bind(project.due_date)
    .bind(project.created_at)
    .bind(&project.source_idea_id)
    .bind(&project.source_idea_title)
    .bind(&project.source_engagement_id)
    .bind(&project.source_engagement_name)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound);
    }

    delete_children(conn, &project.id).await?;

    for (position, task) in project.tasks.iter().enumerate() {
        sqlx::query(
            "INSERT INTO project_tasks (id, project_id, content, is_completed, position)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&task.id)
        .bind(&project.id)
        .bind(&task.content)
        .bind(to_flag(task.is_completed))
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }

    for (position, note) in project.research_notes.iter().enumerate() {
        sqlx::query(
            "INSERT INTO research_notes (id, project_id, date, content, created_at, position)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&note.id)
        .bind(&project.id)
        .bind(note.date)
        .bind(&note.content)
        .bind(note.created_at)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Load one project with its children, or `None` when absent or owned by another user
pub(crate) async fn fetch_project(
    conn: &mut SqliteConnection,
    user_id: &str,
    id: &str,
) -> StorageResult<Option<InternalProject>> {
    let row = sqlx::query("SELECT * FROM projects WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => {
            let mut project = row_to_project(&row)?;
            load_children(conn, &mut project).await?;
            Ok(Some(project))
        }
        None => Ok(None),
    }
}

async fn delete_children(conn: &mut SqliteConnection, project_id: &str) -> StorageResult<()> {
    sqlx::query("DELETE FROM project_tasks WHERE project_id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM research_notes WHERE project_id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn load_children(
    conn: &mut SqliteConnection,
    project: &mut InternalProject,
) -> StorageResult<()> {
    let task_rows =
        sqlx::query("SELECT * FROM project_tasks WHERE project_id = ? ORDER BY position")
            .bind(&project.id)
            .fetch_all(&mut *conn)
            .await?;

    project.tasks = task_rows
        .iter()
        .map(|row| -> StorageResult<ProjectTask> {
            Ok(ProjectTask {
                id: row.try_get("id")?,
                content: row.try_get("content")?,
                is_completed: flag_column(row, "is_completed")?,
            })
        })
        .collect::<StorageResult<_>>()?;

    let note_rows =
        sqlx::query("SELECT * FROM research_notes WHERE project_id = ? ORDER BY position")
            .bind(&project.id)
            .fetch_all(&mut *conn)
            .await?;

    project.research_notes = note_rows
        .iter()
        .map(|row| -> StorageResult<ResearchNote> {
            Ok(ResearchNote {
                id: row.try_get("id")?,
                date: row.try_get("date")?,
                content: row.try_get("content")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect::<StorageResult<_>>()?;

    Ok(())
}

fn row_to_project(row: &SqliteRow) -> StorageResult<InternalProject> {
    Ok(InternalProject {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        status: enum_column(row, "status")?,
        start_date: row.try_get("start_date")?,
        due_date: row.try_get("due_date")?,
        created_at: row.try_get("created_at")?,
        tasks: Vec::new(),
        research_notes: Vec::new(),
        source_idea_id: row.try_get("source_idea_id")?,
        source_idea_title: row.try_get("source_idea_title")?,
        source_engagement_id: row.try_get("source_engagement_id")?,
        source_engagement_name: row.try_get("source_engagement_name")?,
    })
}

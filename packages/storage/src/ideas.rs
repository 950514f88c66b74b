// ABOUTME: Idea storage layer and the idea-to-project conversion transaction
// ABOUTME: Idea entries are an embedded JSON blob on the idea row

use chrono::NaiveDate;
use dayboard_core::{generate_id, ConversionOverrides, Idea, InternalProject};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::codec::{blob_column, encode_blob, enum_column};
use crate::projects::{fetch_project, write_project};
use crate::{StorageError, StorageResult};

/// Result of converting an idea into a project
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub project: InternalProject,
    pub idea: Idea,
    /// False when the idea was already converted and the existing project was returned
    pub created: bool,
}

pub struct IdeaStorage {
    pool: SqlitePool,
}

impl IdeaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> StorageResult<Vec<Idea>> {
        debug!("Fetching ideas for user: {}", user_id);

        let rows = sqlx::query("SELECT * FROM ideas WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_idea).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> StorageResult<Idea> {
        let mut conn = self.pool.acquire().await?;
        fetch_idea(&mut conn, user_id, id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn upsert(&self, user_id: &str, idea: &Idea) -> StorageResult<Idea> {
        debug!("Saving idea: {}", idea.id);

        let result = sqlx::query(
            r#"
            INSERT INTO ideas (
                id, user_id, title, description, entries, category, priority, status,
                created_at, updated_at, ai_summary, last_summary_date,
                engagement_id, engagement_name, converted_to_project_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                entries = excluded.entries,
                category = excluded.category,
                priority = excluded.priority,
                status = excluded.status,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at,
                ai_summary = excluded.ai_summary,
                last_summary_date = excluded.last_summary_date,
                engagement_id = excluded.engagement_id,
                engagement_name = excluded.engagement_name,
                converted_to_project_id = excluded.converted_to_project_id
            WHERE ideas.user_id = excluded.user_id
            "#,
        )
        .bind(&idea.id)
        .bind(user_id)
        .bind(&idea.title)
        .bind(&idea.description)
        .bind(encode_blob(&idea.entries)?)
        .bind(&idea.category)
        .bind(idea.priority.as_str())
        .bind(idea.status.as_str())
        .bind(idea.created_at)
        .bind(idea.updated_at)
        .bind(&idea.ai_summary)
        .bind(idea.last_summary_date)
        .bind(&idea.engagement_id)
        .bind(&idea.engagement_name)
        .bind(&idea.converted_to_project_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(user_id, &idea.id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> StorageResult<()> {
        debug!("Deleting idea: {}", id);

        let result = sqlx::query("DELETE FROM ideas WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Convert an idea into a new internal project.
    ///
    /// The project insert and the idea update commit together or not at all.
    /// An idea that already points at an existing project is returned as-is
    /// with that project and no writes.
    pub async fn convert_to_project(
        &self,
        user_id: &str,
        idea_id: &str,
        overrides: &ConversionOverrides,
        today: NaiveDate,
    ) -> StorageResult<ConversionOutcome> {
        let mut tx = self.pool.begin().await?;

        let mut idea = fetch_idea(&mut tx, user_id, idea_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        if let Some(existing_id) = idea.converted_to_project_id.clone() {
            match fetch_project(&mut tx, user_id, &existing_id).await? {
                Some(project) => {
                    info!(
                        "Idea {} already converted to project {}, returning existing project",
                        idea_id, existing_id
                    );
                    return Ok(ConversionOutcome {
                        project,
                        idea,
                        created: false,
                    });
                }
                None => warn!(
                    "Idea {} points at missing project {}, converting again",
                    idea_id, existing_id
                ),
            }
        }

        let project = idea.to_project(generate_id("proj"), today, overrides);
        write_project(&mut tx, user_id, &project).await?;

        idea.mark_converted(project.id.clone());
        let result = sqlx::query(
            r#"
            UPDATE ideas
            SET converted_to_project_id = ?, status = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&idea.converted_to_project_id)
        .bind(idea.status.as_str())
        .bind(idea.updated_at)
        .bind(&idea.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let project = fetch_project(&mut tx, user_id, &project.id)
            .await?
            .ok_or(StorageError::NotFound)?;
        tx.commit().await?;

        info!("Converted idea {} into project {}", idea.id, project.id);

        Ok(ConversionOutcome {
            project,
            idea,
            created: true,
        })
    }
}

async fn fetch_idea(
    conn: &mut SqliteConnection,
    user_id: &str,
    id: &str,
) -> StorageResult<Option<Idea>> {
    let row = sqlx::query("SELECT * FROM ideas WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(row_to_idea).transpose()
}

fn row_to_idea(row: &SqliteRow) -> StorageResult<Idea> {
    Ok(Idea {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        entries: blob_column(row, "entries")?,
        category: row.try_get("category")?,
        priority: enum_column(row, "priority")?,
        status: enum_column(row, "status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        ai_summary: row.try_get("ai_summary")?,
        last_summary_date: row.try_get("last_summary_date")?,
        engagement_id: row.try_get("engagement_id")?,
        engagement_name: row.try_get("engagement_name")?,
        converted_to_project_id: row.try_get("converted_to_project_id")?,
    })
}

// ABOUTME: HTTP request handlers for internal projects
// ABOUTME: Saves replace the project's task and research-note children wholesale

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use dayboard_core::{InternalProject, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::response::{ok, ApiResponse, Deleted};

pub async fn list_projects(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<InternalProject>>>> {
    let projects = db.project_storage.list(&user.id).await?;
    Ok(ok(projects))
}

/// Create or replace a project together with all of its children
pub async fn save_project(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<InternalProject>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<InternalProject>>> {
    let Json(project) = body?;
    project.validate()?;

    info!(
        "Saving project {} ({} tasks, {} notes) for user {}",
        project.id,
        project.tasks.len(),
        project.research_notes.len(),
        user.id
    );

    let saved = db.project_storage.upsert(&user.id, &project).await?;
    Ok(ok(saved))
}

pub async fn delete_project(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting project {} for user {}", id, user.id);

    db.project_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

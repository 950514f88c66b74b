// ABOUTME: HTTP request handlers for standalone tasks
// ABOUTME: Listing accepts optional `date` and `type` filters

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use dayboard_core::{Resource, Task};
use dayboard_storage::{DbState, TaskFilter};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::response::{ok, ApiResponse, Deleted};

/// List tasks, optionally narrowed to one date and/or type
pub async fn list_tasks(
    State(db): State<DbState>,
    user: CurrentUser,
    filter: Result<Query<TaskFilter>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let Query(filter) = filter?;
    let tasks = db.task_storage.list(&user.id, &filter).await?;
    Ok(ok(tasks))
}

pub async fn save_task(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<Task>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let Json(task) = body?;
    task.validate()?;

    info!("Saving task {} for user {}", task.id, user.id);

    let saved = db.task_storage.upsert(&user.id, &task).await?;
    Ok(ok(saved))
}

pub async fn delete_task(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting task {} for user {}", id, user.id);

    db.task_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

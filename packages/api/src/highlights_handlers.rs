// ABOUTME: HTTP request handlers for highlights

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use dayboard_core::{Highlight, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::response::{ok, ApiResponse, Deleted};

pub async fn list_highlights(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<Highlight>>>> {
    let highlights = db.highlight_storage.list(&user.id).await?;
    Ok(ok(highlights))
}

pub async fn save_highlight(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<Highlight>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Highlight>>> {
    let Json(highlight) = body?;
    highlight.validate()?;

    info!("Saving highlight {} for user {}", highlight.id, user.id);

    let saved = db.highlight_storage.upsert(&user.id, &highlight).await?;
    Ok(ok(saved))
}

pub async fn delete_highlight(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting highlight {} for user {}", id, user.id);

    db.highlight_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

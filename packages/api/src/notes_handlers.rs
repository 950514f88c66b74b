// ABOUTME: HTTP request handlers for notes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use dayboard_core::{Note, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::response::{ok, ApiResponse, Deleted};

pub async fn list_notes(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<Note>>>> {
    let notes = db.note_storage.list(&user.id).await?;
    Ok(ok(notes))
}

pub async fn save_note(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<Note>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Note>>> {
    let Json(note) = body?;
    note.validate()?;

    info!("Saving note {} for user {}", note.id, user.id);

    let saved = db.note_storage.upsert(&user.id, &note).await?;
    Ok(ok(saved))
}

pub async fn delete_note(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting note {} for user {}", id, user.id);

    db.note_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

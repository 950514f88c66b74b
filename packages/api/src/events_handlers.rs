// ABOUTME: HTTP request handlers for calendar events

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use dayboard_core::{CalendarEvent, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::response::{ok, ApiResponse, Deleted};

pub async fn list_events(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<CalendarEvent>>>> {
    let events = db.event_storage.list(&user.id).await?;
    Ok(ok(events))
}

pub async fn save_event(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<CalendarEvent>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<CalendarEvent>>> {
    let Json(event) = body?;
    event.validate()?;

    info!("Saving calendar event {} for user {}", event.id, user.id);

    let saved = db.event_storage.upsert(&user.id, &event).await?;
    Ok(ok(saved))
}

pub async fn delete_event(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting calendar event {} for user {}", id, user.id);

    db.event_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

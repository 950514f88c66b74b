// ABOUTME: HTTP request handlers for useful links

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use dayboard_core::{UsefulLink, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::response::{ok, ApiResponse, Deleted};

pub async fn list_links(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<UsefulLink>>>> {
    let links = db.link_storage.list(&user.id).await?;
    Ok(ok(links))
}

pub async fn save_link(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<UsefulLink>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<UsefulLink>>> {
    let Json(link) = body?;
    link.validate()?;

    info!("Saving useful link {} for user {}", link.id, user.id);

    let saved = db.link_storage.upsert(&user.id, &link).await?;
    Ok(ok(saved))
}

pub async fn delete_link(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting useful link {} for user {}", id, user.id);

    db.link_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

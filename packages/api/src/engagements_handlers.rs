// ABOUTME: HTTP request handlers for engagements
// ABOUTME: Whole-object upserts plus AI summary generation

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use dayboard_ai::engagement_prompt;
use dayboard_core::{Engagement, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::{ApiResult, AppError};
use crate::response::{ok, ApiResponse, Deleted};
use crate::ApiState;

/// List all engagements for the current user
pub async fn list_engagements(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<Engagement>>>> {
    let engagements = db.engagement_storage.list(&user.id).await?;
    Ok(ok(engagements))
}

/// Create or replace an engagement by id
pub async fn save_engagement(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<Engagement>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Engagement>>> {
    let Json(engagement) = body?;
    engagement.validate()?;

    info!("Saving engagement {} for user {}", engagement.id, user.id);

    let saved = db.engagement_storage.upsert(&user.id, &engagement).await?;
    Ok(ok(saved))
}

pub async fn delete_engagement(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting engagement {} for user {}", id, user.id);

    db.engagement_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

/// Generate and store an AI summary of the engagement timeline
pub async fn summarize_engagement(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Engagement>>> {
    let summarizer = state.summarizer.clone().ok_or(AppError::AiUnavailable)?;

    let mut engagement = state.db.engagement_storage.get(&user.id, &id).await?;

    info!("Generating summary for engagement {}", id);
    let summary = summarizer.summarize(&engagement_prompt(&engagement)).await?;

    engagement.ai_summary = Some(summary);
    engagement.last_summary_date = Some(Utc::now());

    let saved = state
        .db
        .engagement_storage
        .upsert(&user.id, &engagement)
        .await?;
    Ok(ok(saved))
}

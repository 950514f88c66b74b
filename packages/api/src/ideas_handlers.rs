// ABOUTME: HTTP request handlers for ideas
// ABOUTME: Includes idea-to-project conversion and AI summaries

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use dayboard_ai::idea_prompt;
use dayboard_core::{ConversionOverrides, Idea, InternalProject, Resource};
use dayboard_storage::DbState;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::{ApiResult, AppError};
use crate::response::{ok, ApiResponse, Deleted};
use crate::ApiState;

pub async fn list_ideas(
    State(db): State<DbState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<Idea>>>> {
    let ideas = db.idea_storage.list(&user.id).await?;
    Ok(ok(ideas))
}

pub async fn save_idea(
    State(db): State<DbState>,
    user: CurrentUser,
    body: Result<Json<Idea>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Idea>>> {
    let Json(idea) = body?;
    idea.validate()?;

    info!("Saving idea {} for user {}", idea.id, user.id);

    let saved = db.idea_storage.upsert(&user.id, &idea).await?;
    Ok(ok(saved))
}

pub async fn delete_idea(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    info!("Deleting idea {} for user {}", id, user.id);

    db.idea_storage.delete(&user.id, &id).await?;
    Ok(ok(Deleted { id }))
}

/// An empty body means "use the defaults derived from the idea"
fn parse_overrides(body: &[u8]) -> Result<ConversionOverrides, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ConversionOverrides::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid conversion overrides: {}", e)))
}

/// Convert an idea into a new internal project
pub async fn convert_idea(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<InternalProject>>> {
    let overrides = parse_overrides(&body)?;

    info!("Converting idea {} to project for user {}", id, user.id);

    let outcome = db
        .idea_storage
        .convert_to_project(&user.id, &id, &overrides, dayboard_core::today())
        .await?;

    if !outcome.created {
        info!(
            "Idea {} was already converted, returning project {}",
            id, outcome.project.id
        );
    }

    Ok(ok(outcome.project))
}

/// Generate and store an AI summary of the idea's entries
pub async fn summarize_idea(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Idea>>> {
    let summarizer = state.summarizer.clone().ok_or(AppError::AiUnavailable)?;

    let mut idea = state.db.idea_storage.get(&user.id, &id).await?;

    info!("Generating summary for idea {}", id);
    let summary = summarizer.summarize(&idea_prompt(&idea)).await?;

    let now = Utc::now();
    idea.ai_summary = Some(summary);
    idea.last_summary_date = Some(now);
    idea.updated_at = now;

    let saved = state.db.idea_storage.upsert(&user.id, &idea).await?;
    Ok(ok(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayboard_core::ProjectStatus;

    #[test]
    fn test_blank_body_uses_defaults() {
        assert_eq!(parse_overrides(b"").unwrap(), ConversionOverrides::default());
        assert_eq!(parse_overrides(b"  \n").unwrap(), ConversionOverrides::default());
    }

    #[test]
    fn test_overrides_parse_camel_case() {
        let overrides =
            parse_overrides(br#"{"name":"Bot","status":"In Progress","dueDate":"2025-07-01"}"#)
                .unwrap();
        assert_eq!(overrides.name.as_deref(), Some("Bot"));
        assert_eq!(overrides.status, Some(ProjectStatus::InProgress));
        assert!(overrides.due_date.is_some());
    }

    #[test]
    fn test_malformed_overrides_are_rejected() {
        assert!(matches!(
            parse_overrides(b"{not json"),
            Err(AppError::Validation(_))
        ));
    }
}

// ABOUTME: HTTP request handlers for per-user settings
// ABOUTME: Values are opaque JSON documents keyed by name

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use dayboard_storage::DbState;
use serde_json::Value;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::{ApiResult, AppError};
use crate::response::{ok, ApiResponse};

const MAX_KEY_LENGTH: usize = 128;

fn validate_key(key: &str) -> Result<(), AppError> {
    if key.trim().is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(AppError::validation(format!(
            "Setting key must be 1-{} characters",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Returns the stored value, or `null` when the key was never written
pub async fn get_setting(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    validate_key(&key)?;
    let value = db.settings_storage.get(&user.id, &key).await?;
    Ok(ok(value.unwrap_or(Value::Null)))
}

pub async fn put_setting(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(key): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    validate_key(&key)?;
    let Json(value) = body?;

    info!("Storing setting {} for user {}", key, user.id);

    db.settings_storage.put(&user.id, &key, &value).await?;
    Ok(ok(value))
}

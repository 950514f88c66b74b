// ABOUTME: Registration, login, and current-user endpoints
// ABOUTME: Registering the legacy account claims rows created before accounts existed

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use dayboard_auth::{
    hash_password, normalize_email, validate_email, validate_password, verify_password,
};
use dayboard_core::{require, User};
use dayboard_storage::{assign_orphans, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::error::{ApiResult, AppError};
use crate::response::{ok, ApiResponse};
use crate::ApiState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token plus the public user profile
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

fn session(state: &ApiState, record: &UserRecord) -> ApiResult<AuthResponse> {
    let token = state.tokens.issue(&record.id, &record.email)?;
    Ok(AuthResponse {
        token,
        user: record.to_user(),
    })
}

pub async fn register(
    State(state): State<ApiState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    let Json(request) = body?;

    require("email", &request.email)?;
    require("password", &request.password)?;
    require("name", &request.name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let email = normalize_email(&request.email);
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(AppError::internal)??;

    let record = state
        .db
        .user_storage
        .create_user(&email, &request.name, &password_hash)
        .await?;

    info!("Registered user {} ({})", record.id, record.email);

    let is_legacy = state
        .legacy_email
        .as_deref()
        .is_some_and(|legacy| normalize_email(legacy) == record.email);
    if is_legacy {
        match assign_orphans(&state.db.pool, &record.email, Duration::ZERO).await {
            Ok(report) => info!(
                "Legacy account registered, claimed {} existing rows",
                report.total()
            ),
            Err(e) => warn!("Failed to assign existing rows to legacy account: {}", e),
        }
    }

    Ok(ok(session(&state, &record)?))
}

pub async fn login(
    State(state): State<ApiState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    let Json(request) = body?;

    require("email", &request.email)?;
    require("password", &request.password)?;

    let invalid = || AppError::unauthorized("Invalid email or password");

    let record = state
        .db
        .user_storage
        .get_by_email(&normalize_email(&request.email))
        .await?
        .ok_or_else(invalid)?;

    let password = request.password;
    let stored_hash = record.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(AppError::internal)?;

    if !matches {
        info!("Failed login for {}", record.email);
        return Err(invalid());
    }

    Ok(ok(session(&state, &record)?))
}

pub async fn me(
    State(state): State<ApiState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let profile = state
        .db
        .user_storage
        .get(&user.id)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::NotFound => AppError::unauthorized("Account no longer exists"),
            other => other,
        })?;

    Ok(ok(profile))
}

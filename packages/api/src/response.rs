// ABOUTME: Shared API response envelope
// ABOUTME: Successful responses carry `{ success: true, data, error: null }`

use axum::Json;
use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Wrap a value in a successful JSON envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Payload returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::response::{ok, ApiResponse};

pub async fn health_check() -> Json<ApiResponse<Value>> {
    ok(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "dayboard"
    }))
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use dayboard_storage::DbState;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::config::Config;
use crate::server::{build_app, build_state, claim_legacy_rows, migrate};

fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "LEGACY_MIGRATION_DELAY_MS" => Some("0".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_app_serves_health_with_cors() {
    let config = test_config();
    let db = DbState::in_memory().await.unwrap();
    let app = build_app(build_state(db, &config).unwrap(), &config).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_invalid_cors_origin_is_rejected() {
    let mut config = test_config();
    config.cors_origin = "bad\norigin".to_string();

    let db = DbState::in_memory().await.unwrap();
    assert!(build_app(build_state(db, &config).unwrap(), &config).is_err());
}

#[tokio::test]
async fn test_claim_without_legacy_email_is_noop() {
    let config = test_config();
    let db = DbState::in_memory().await.unwrap();
    claim_legacy_rows(&db, &config).await.unwrap();
}

#[tokio::test]
async fn test_migrate_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("dayboard.db");

    let mut config = test_config();
    config.database_path = Some(path.clone());
    config.legacy_user_email = Some("owner@example.com".to_string());

    migrate(config).await.unwrap();
    assert!(path.exists());
}

// ABOUTME: Startup wiring for the Dayboard server
// ABOUTME: Opens the database, claims legacy rows, then serves the API with CORS and tracing

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::Router;
use dayboard_ai::HttpSummarizer;
use dayboard_api::{create_router, ApiState};
use dayboard_auth::TokenIssuer;
use dayboard_storage::{assign_orphans, DbState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;

/// Engagement files travel inline as base64, so bodies are allowed to be large
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Open the database and run the schema plus ownership migrations
pub async fn open_database(config: &Config) -> anyhow::Result<DbState> {
    DbState::init_with_path(config.database_path.clone())
        .await
        .context("Failed to open database")
}

/// Hand unowned rows to the legacy account, if one is configured
pub async fn claim_legacy_rows(db: &DbState, config: &Config) -> anyhow::Result<()> {
    let Some(email) = config.legacy_user_email.as_deref() else {
        return Ok(());
    };

    let report = assign_orphans(&db.pool, email, config.legacy_migration_delay)
        .await
        .context("Failed to assign existing data to legacy user")?;

    if report.total() > 0 {
        info!("Assigned {} existing rows to {}", report.total(), email);
    }
    Ok(())
}

/// API state with auth and, when configured, the summary client
pub fn build_state(db: DbState, config: &Config) -> anyhow::Result<ApiState> {
    let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_expiry_hours)
        .context("Invalid token configuration")?;
    let mut state = ApiState::new(db, tokens);

    match config.ai_summary_url.as_deref() {
        Some(url) => {
            let summarizer = HttpSummarizer::new(url, config.ai_summary_api_key.clone())
                .context("Invalid AI summary configuration")?;
            state = state.with_summarizer(Arc::new(summarizer));
        }
        None => warn!("AI_SUMMARY_URL is not set, summary endpoints will return 503"),
    }

    if let Some(email) = &config.legacy_user_email {
        state = state.with_legacy_email(email.clone());
    }

    Ok(state)
}

/// Router plus the HTTP layers the binary adds around it
pub fn build_app(state: ApiState, config: &Config) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(create_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let db = open_database(&config).await?;

    // Ownership must be settled before the first request is accepted
    claim_legacy_rows(&db, &config).await?;

    let state = build_state(db, &config)?;
    let app = build_app(state, &config)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Dayboard listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Run migrations and the legacy claim without serving
pub async fn migrate(config: Config) -> anyhow::Result<()> {
    let db = open_database(&config).await?;
    claim_legacy_rows(&db, &config).await?;
    info!("Migrations complete");
    Ok(())
}

// ABOUTME: HTTP API layer for Dayboard providing REST endpoints and routing
// ABOUTME: Integration layer over storage, auth, and AI summary packages

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post},
    Router,
};

use dayboard_ai::Summarizer;
use dayboard_auth::TokenIssuer;
use dayboard_storage::DbState;

pub mod auth;
pub mod auth_handlers;
pub mod engagements_handlers;
pub mod error;
pub mod events_handlers;
pub mod health;
pub mod highlights_handlers;
pub mod ideas_handlers;
pub mod links_handlers;
pub mod notes_handlers;
pub mod projects_handlers;
pub mod response;
pub mod settings_handlers;
pub mod tasks_handlers;

pub use auth::CurrentUser;
pub use error::{ApiResult, AppError};
pub use response::ApiResponse;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub db: DbState,
    pub tokens: Arc<TokenIssuer>,
    /// `None` when no AI endpoint is configured
    pub summarizer: Option<Arc<dyn Summarizer>>,
    /// Account that inherits rows created before accounts existed
    pub legacy_email: Option<String>,
}

impl ApiState {
    pub fn new(db: DbState, tokens: TokenIssuer) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            summarizer: None,
            legacy_email: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_legacy_email(mut self, email: impl Into<String>) -> Self {
        self.legacy_email = Some(email.into());
        self
    }
}

impl FromRef<ApiState> for DbState {
    fn from_ref(state: &ApiState) -> Self {
        state.db.clone()
    }
}

/// Routes that need a bearer token
fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/me", get(auth_handlers::me))
        .route(
            "/engagements",
            get(engagements_handlers::list_engagements).post(engagements_handlers::save_engagement),
        )
        .route("/engagements/{id}", delete(engagements_handlers::delete_engagement))
        .route(
            "/engagements/{id}/summary",
            post(engagements_handlers::summarize_engagement),
        )
        .route(
            "/tasks",
            get(tasks_handlers::list_tasks).post(tasks_handlers::save_task),
        )
        .route("/tasks/{id}", delete(tasks_handlers::delete_task))
        .route(
            "/projects",
            get(projects_handlers::list_projects).post(projects_handlers::save_project),
        )
        .route("/projects/{id}", delete(projects_handlers::delete_project))
        .route(
            "/ideas",
            get(ideas_handlers::list_ideas).post(ideas_handlers::save_idea),
        )
        .route("/ideas/{id}", delete(ideas_handlers::delete_idea))
        .route(
            "/ideas/{id}/convert-to-project",
            post(ideas_handlers::convert_idea),
        )
        .route("/ideas/{id}/summary", post(ideas_handlers::summarize_idea))
        .route(
            "/highlights",
            get(highlights_handlers::list_highlights).post(highlights_handlers::save_highlight),
        )
        .route("/highlights/{id}", delete(highlights_handlers::delete_highlight))
        .route(
            "/events",
            get(events_handlers::list_events).post(events_handlers::save_event),
        )
        .route("/events/{id}", delete(events_handlers::delete_event))
        .route(
            "/links",
            get(links_handlers::list_links).post(links_handlers::save_link),
        )
        .route("/links/{id}", delete(links_handlers::delete_link))
        .route(
            "/notes",
            get(notes_handlers::list_notes).post(notes_handlers::save_note),
        )
        .route("/notes/{id}", delete(notes_handlers::delete_note))
        .route(
            "/settings/{key}",
            get(settings_handlers::get_setting).post(settings_handlers::put_setting),
        )
}

/// Routes reachable without a token
fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
}

/// Creates the full `/api` router
pub fn create_router(state: ApiState) -> Router {
    let protected = protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_auth,
    ));

    Router::new()
        .nest("/api", public_routes().merge(protected))
        .with_state(state)
}

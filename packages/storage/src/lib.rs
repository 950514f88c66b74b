// ABOUTME: Data layer for Dayboard: SQLite pool, migrations, and per-entity storage
// ABOUTME: Nested JSON blobs and 0/1 flags are decoded here and never leak to callers

use thiserror::Error;

pub mod codec;
pub mod db;
pub mod engagements;
pub mod events;
pub mod highlights;
pub mod ideas;
pub mod links;
pub mod notes;
pub mod projects;
pub mod settings;
pub mod tasks;
pub mod tenancy;
pub mod users;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid stored value: {0}")]
    InvalidValue(#[from] dayboard_core::ValidationError),
    #[error("Record not found")]
    NotFound,
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub use db::DbState;
pub use engagements::EngagementStorage;
pub use events::EventStorage;
pub use highlights::HighlightStorage;
pub use ideas::{ConversionOutcome, IdeaStorage};
pub use links::LinkStorage;
pub use notes::NoteStorage;
pub use projects::ProjectStorage;
pub use settings::SettingsStorage;
pub use tasks::{TaskFilter, TaskStorage};
pub use tenancy::{assign_orphans, ensure_user_columns, OrphanReport, TENANT_TABLES};
pub use users::{UserRecord, UserStorage};

// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and every storage layer

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    tenancy, EngagementStorage, EventStorage, HighlightStorage, IdeaStorage, LinkStorage,
    NoteStorage, ProjectStorage, SettingsStorage, StorageError, TaskStorage, UserStorage,
};

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub engagement_storage: Arc<EngagementStorage>,
    pub task_storage: Arc<TaskStorage>,
    pub project_storage: Arc<ProjectStorage>,
    pub idea_storage: Arc<IdeaStorage>,
    pub highlight_storage: Arc<HighlightStorage>,
    pub event_storage: Arc<EventStorage>,
    pub link_storage: Arc<LinkStorage>,
    pub note_storage: Arc<NoteStorage>,
    pub user_storage: Arc<UserStorage>,
    pub settings_storage: Arc<SettingsStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            engagement_storage: Arc::new(EngagementStorage::new(pool.clone())),
            task_storage: Arc::new(TaskStorage::new(pool.clone())),
            project_storage: Arc::new(ProjectStorage::new(pool.clone())),
            idea_storage: Arc::new(IdeaStorage::new(pool.clone())),
            highlight_storage: Arc::new(HighlightStorage::new(pool.clone())),
            event_storage: Arc::new(EventStorage::new(pool.clone())),
            link_storage: Arc::new(LinkStorage::new(pool.clone())),
            note_storage: Arc::new(NoteStorage::new(pool.clone())),
            user_storage: Arc::new(UserStorage::new(pool.clone())),
            settings_storage: Arc::new(SettingsStorage::new(pool.clone())),
            pool,
        }
    }

    /// Initialize database state at the default location
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(database_path: Option<PathBuf>) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(dayboard_core::database_file);

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!("Connecting to database: {}", database_path.display());

        // Pragmas go on the connect options so every pooled connection gets them
        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("Database connection established");

        Self::prepare(pool).await
    }

    /// Ephemeral database living in a single pooled connection
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // One connection that never expires, otherwise the database vanishes
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::prepare(pool).await
    }

    /// Run schema migrations and the idempotent ownership-column retrofit
    async fn prepare(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        debug!("Database migrations completed");

        tenancy::ensure_user_columns(&pool).await?;

        Ok(Self::new(pool))
    }
}

// ABOUTME: Per-user ownership retrofit for databases created before accounts existed
// ABOUTME: Adds user_id columns idempotently and hands orphaned rows to a legacy account

use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::StorageResult;

/// Tables whose rows belong to a single user
pub const TENANT_TABLES: &[&str] = &[
    "engagements",
    "tasks",
    "projects",
    "ideas",
    "highlights",
    "calendar_events",
    "useful_links",
    "notes",
    "settings",
];

/// Result of assigning ownerless rows to the legacy account
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrphanReport {
    /// `None` when no account with the legacy email exists yet
    pub legacy_user_id: Option<String>,
    /// Rows claimed per table
    pub assigned: Vec<(String, u64)>,
}

impl OrphanReport {
    pub fn total(&self) -> u64 {
        self.assigned.iter().map(|(_, n)| n).sum()
    }
}

/// Add a `user_id` column and index to every tenant table. Safe to run on every start.
pub async fn ensure_user_columns(pool: &SqlitePool) -> StorageResult<()> {
    for table in TENANT_TABLES {
        let alter = format!("ALTER TABLE {table} ADD COLUMN user_id TEXT");
        match sqlx::query(&alter).execute(pool).await {
            Ok(_) => debug!("Added user_id column to {}", table),
            Err(sqlx::Error::Database(e)) if e.message().contains("duplicate column name") => {}
            Err(e) => return Err(e.into()),
        }

        let index = format!("CREATE INDEX IF NOT EXISTS idx_{table}_user_id ON {table}(user_id)");
        sqlx::query(&index).execute(pool).await?;
    }

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_settings_user_key ON settings(user_id, key)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Assign every row with no owner to the account registered under `legacy_email`.
///
/// Waits `delay` first so a concurrently starting registration can land. Rows
/// that would collide with an existing owned row (settings keys) stay orphaned.
pub async fn assign_orphans(
    pool: &SqlitePool,
    legacy_email: &str,
    delay: Duration,
) -> StorageResult<OrphanReport> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let user_id: Option<String> =
        sqlx::query_scalar("SELECT id FROM users WHERE email = ? COLLATE NOCASE")
            .bind(legacy_email.trim())
            .fetch_optional(pool)
            .await?;

    let Some(user_id) = user_id else {
        warn!(
            "Legacy user {} not registered yet, leaving existing data unassigned",
            legacy_email
        );
        return Ok(OrphanReport::default());
    };

    let mut report = OrphanReport {
        legacy_user_id: Some(user_id.clone()),
        assigned: Vec::new(),
    };

    for table in TENANT_TABLES {
        let update = format!("UPDATE OR IGNORE {table} SET user_id = ? WHERE user_id IS NULL");
        let result = sqlx::query(&update).bind(&user_id).execute(pool).await?;
        let count = result.rows_affected();
        if count > 0 {
            info!("Assigned {} orphaned rows in {} to {}", count, table, legacy_email);
        }
        report.assigned.push((table.to_string(), count));
    }

    Ok(report)
}

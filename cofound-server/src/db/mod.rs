//! Database connection handling
//!
//! One SQLite file, opened with a small sqlx pool. Schema is applied
//! idempotently at startup (see [`migrations`]).

pub mod migrations;
pub mod repos;

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
/// Kept low for a single-file SQLite database.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open (creating if missing) the database file and build a pool.
///
/// Foreign keys are enforced on every connection; SQLite leaves them
/// off by default.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open sqlite database at {}", path.display()))?;

    Ok(pool)
}

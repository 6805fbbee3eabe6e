//! Database connection management

use std::{str::FromStr, time::Duration};

use sqlx::{
    Sqlite, SqlitePool, Transaction,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Handle used by services to open transactions against the shop database.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// Every service operation runs inside exactly one of these; SQLite's
    /// single-writer locking serializes conflicting writers at this boundary.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the
    /// transaction cannot be started.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Open the shop database, creating the file when missing.
///
/// Foreign keys are enabled so cart items cascade with their cart and keep a
/// nulled product reference when a product is removed from the catalog.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_path)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new().connect_with(options).await
}

/// Apply the embedded schema.
///
/// Idempotent; every statement is `CREATE ... IF NOT EXISTS`.
///
/// # Errors
///
/// Returns an error when any schema statement fails.
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}

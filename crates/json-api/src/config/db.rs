//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `SQLite` database path
    #[arg(long, env = "DATABASE_PATH", default_value = "autoparts.db")]
    pub database_path: String,
}

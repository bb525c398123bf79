use thiserror::Error;

// Database modules
pub mod connection;
pub mod key_value;
pub mod migrations;

// Re-export database connection functions
pub use connection::*;
pub use key_value::{KeyValueStore, SqliteKeyValueStore};

/// Database error enum
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// Unsupported storage backend
    #[error("Unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),
}

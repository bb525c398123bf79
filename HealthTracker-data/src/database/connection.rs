//! Database connection module for the HealthTracker application
//!
//! Storage is selected once at startup:
//! - SQLite (default), a file-backed key/value table
//! - memory, process-local storage with no database at all

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{error, info, warn};

use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Connection pool shared by SQLite-backed stores
pub type DatabasePool = r2d2::Pool<SqliteConnectionManager>;

/// Default location of the SQLite database file
pub const DEFAULT_SQLITE_PATH: &str = "data/health_tracker.db";

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local storage, lost on restart
    Memory,
    /// SQLite database (file-based)
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "volatile" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(DatabaseError::UnsupportedBackend(s.to_string())),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Storage backend (memory, sqlite)
    pub backend: StorageBackend,
    /// Path to SQLite database file
    pub sqlite_path: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            sqlite_path: DEFAULT_SQLITE_PATH.to_string(),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => defaults.backend,
        };

        let sqlite_path = lookup("DB_SQLITE_PATH").unwrap_or(defaults.sqlite_path);

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| DatabaseError::ConfigError(format!("Invalid DB_MAX_CONNECTIONS: {}", value)))?,
            None => defaults.max_connections,
        };

        let timeout_seconds = match lookup("DB_TIMEOUT_SECONDS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| DatabaseError::ConfigError(format!("Invalid DB_TIMEOUT_SECONDS: {}", value)))?,
            None => defaults.timeout_seconds,
        };

        Ok(DatabaseConfig {
            backend,
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }
}

/// Initialize the SQLite connection pool and run migrations
pub fn initialize_database_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing SQLite database at: {}", config.sqlite_path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(&config.sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create directory: {}, falling back to in-memory database", e);
                return initialize_in_memory_pool(config);
            }
        }
    }

    let manager = SqliteConnectionManager::file(&config.sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    let pool = match r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to create SQLite connection pool: {}", e);
            warn!("Falling back to in-memory SQLite database");
            return initialize_in_memory_pool(config);
        }
    };

    run_migrations(&pool)?;
    info!("SQLite connection pool created successfully");

    Ok(pool)
}

/// Initialize an in-memory SQLite database.
///
/// Every connection to `:memory:` opens a separate database, so the pool holds one.
pub fn initialize_in_memory_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(SqliteConnectionManager::memory())?;

    run_migrations(&pool)?;

    info!("In-memory SQLite database initialized successfully");
    Ok(pool)
}

/// Run database migrations
fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    let conn = pool.get()?;
    run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)
}

/// Get information about a database connection pool
pub fn get_connection_info(pool: &DatabasePool) -> String {
    let location = pool
        .get()
        .ok()
        .and_then(|conn| {
            conn.query_row("PRAGMA database_list", [], |row| row.get::<_, String>(2))
                .ok()
        });

    let description = match location.as_deref() {
        Some("") | Some(":memory:") => "SQLite in-memory database".to_string(),
        Some(path) => format!("SQLite database at {}", path),
        None => "SQLite database (path unknown)".to_string(),
    };

    let state = pool.state();
    format!(
        "{} (connections: active={}, idle={})",
        description, state.connections, state.idle_connections
    )
}

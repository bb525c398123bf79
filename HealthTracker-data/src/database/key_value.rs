use rusqlite::OptionalExtension;
use tracing::debug;

use super::connection::DatabasePool;
use super::DatabaseError;

/// String key/value storage used by persistent repositories
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get_string(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;
}

/// Key/value store backed by the SQLite `key_value_store` table
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: DatabasePool,
}

impl SqliteKeyValueStore {
    /// Create a store over an initialized pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        debug!("Reading key from database: {}", key);

        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM key_value_store WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        debug!("Writing key to database: {} ({} bytes)", key, value.len());

        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO key_value_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;

        Ok(())
    }
}

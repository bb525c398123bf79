use std::sync::PoisonError;
use thiserror::Error;

use crate::database::DatabaseError;
use crate::mappers::MappingError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Reading could not be converted into a record
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// No record has the requested id
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Stored records could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Mutex lock error
    #[error("Mutex lock error: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::MutexLock(error.to_string())
    }
}

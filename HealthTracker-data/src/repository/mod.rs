// Repository module structure
pub mod errors;
mod blood_pressure;
mod in_memory;
mod storage;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use blood_pressure::{create_repository, BloodPressureRepositoryTrait, SharedBloodPressureRepository};
pub use in_memory::{InMemoryBloodPressureRepository, InMemoryStore};
pub use storage::{KeyValueBloodPressureRepository, RECORDS_KEY};

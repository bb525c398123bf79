use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::models::blood_pressure::{BloodPressureReading, BloodPressureRecordModel};
use super::blood_pressure::{new_unique_record, replace_record, to_sorted_readings, BloodPressureRepositoryTrait};
use super::errors::RepositoryError;

/// Process-local record storage.
///
/// Clones share the same records, so the composing layer decides how long they live.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<Vec<BloodPressureRecordModel>>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with records
    pub fn with_records(records: Vec<BloodPressureRecordModel>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Snapshot of the stored records in insertion order
    pub fn records(&self) -> Result<Vec<BloodPressureRecordModel>, RepositoryError> {
        Ok(self.records.lock()?.clone())
    }
}

/// Blood pressure repository over an injected [`InMemoryStore`]
#[derive(Debug, Clone)]
pub struct InMemoryBloodPressureRepository {
    store: InMemoryStore,
}

impl InMemoryBloodPressureRepository {
    /// Create a repository over `store`
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BloodPressureRepositoryTrait for InMemoryBloodPressureRepository {
    async fn save(&self, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, RepositoryError> {
        let mut records = self.store.records.lock()?;
        let record = new_unique_record(&records, &reading)?;

        debug!("Storing blood pressure record in memory: {}", record.created_at);
        records.push(record.clone());

        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<BloodPressureReading>, RepositoryError> {
        let records = self.store.records()?;
        debug!("Getting {} blood pressure records from memory", records.len());
        Ok(to_sorted_readings(&records))
    }

    async fn update(&self, id: &str, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, RepositoryError> {
        let mut records = self.store.records.lock()?;
        debug!("Updating blood pressure record in memory: {}", id);
        replace_record(&mut records, id, &reading)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut records = self.store.records.lock()?;
        let before = records.len();
        records.retain(|record| record.created_at != id);

        debug!("Deleted {} blood pressure record(s) with id {}", before - records.len(), id);
        Ok(())
    }
}

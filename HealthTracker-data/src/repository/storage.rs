use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::database::KeyValueStore;
use crate::models::blood_pressure::{BloodPressureReading, BloodPressureRecordModel};
use super::blood_pressure::{new_unique_record, replace_record, to_sorted_readings, BloodPressureRepositoryTrait};
use super::errors::RepositoryError;

/// Key under which the record list is stored
pub const RECORDS_KEY: &str = "blood_pressure_records";

/// Blood pressure repository persisting the full record list as one JSON document.
///
/// Every mutation reads and rewrites the whole array.
pub struct KeyValueBloodPressureRepository<S: KeyValueStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> KeyValueBloodPressureRepository<S> {
    /// Create a repository over a key/value store
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn load_records(&self) -> Result<Vec<BloodPressureRecordModel>, RepositoryError> {
        match self.store.get_string(RECORDS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn store_records(&self, records: &[BloodPressureRecordModel]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(records)?;
        self.store.set(RECORDS_KEY, &json)?;
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore> BloodPressureRepositoryTrait for KeyValueBloodPressureRepository<S> {
    async fn save(&self, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_records()?;
        let record = new_unique_record(&records, &reading)?;

        debug!("Storing blood pressure record under {}: {}", RECORDS_KEY, record.created_at);
        records.push(record.clone());
        self.store_records(&records)?;

        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<BloodPressureReading>, RepositoryError> {
        let records = self.load_records()?;
        debug!("Loaded {} blood pressure records from {}", records.len(), RECORDS_KEY);
        Ok(to_sorted_readings(&records))
    }

    async fn update(&self, id: &str, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_records()?;
        let updated = replace_record(&mut records, id, &reading)?;
        self.store_records(&records)?;

        debug!("Updated blood pressure record {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_records()?;
        let before = records.len();
        records.retain(|record| record.created_at != id);

        if records.len() != before {
            self.store_records(&records)?;
        }

        debug!("Deleted {} blood pressure record(s) with id {}", before - records.len(), id);
        Ok(())
    }
}

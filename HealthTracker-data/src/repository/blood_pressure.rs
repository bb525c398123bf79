use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, SecondsFormat};
use tracing::{debug, info};

use crate::database::{
    get_connection_info, initialize_database_pool, DatabaseConfig, DatabaseError, SqliteKeyValueStore, StorageBackend,
};
use crate::mappers::{to_reading_ui, to_record_model};
use crate::models::blood_pressure::{BloodPressureReading, BloodPressureRecordModel};
use super::errors::RepositoryError;
use super::in_memory::{InMemoryBloodPressureRepository, InMemoryStore};
use super::storage::KeyValueBloodPressureRepository;

/// Repository trait for blood pressure records
#[async_trait]
pub trait BloodPressureRepositoryTrait {
    /// Convert a reading into a record and store it
    async fn save(&self, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, RepositoryError>;

    /// Get all readings, newest first
    async fn get_all(&self) -> Result<Vec<BloodPressureReading>, RepositoryError>;

    /// Replace the measurements of the record whose `createdAt` equals `id`
    async fn update(&self, id: &str, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, RepositoryError>;

    /// Remove the record whose `createdAt` equals `id`; absent ids are ignored
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// Repository handle shared across the application
pub type SharedBloodPressureRepository = Arc<dyn BloodPressureRepositoryTrait + Send + Sync>;

/// Create the repository selected by the configuration
pub fn create_repository(config: &DatabaseConfig) -> Result<SharedBloodPressureRepository, DatabaseError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory blood pressure repository");
            Ok(Arc::new(InMemoryBloodPressureRepository::new(InMemoryStore::new())))
        }
        StorageBackend::Sqlite => {
            let pool = initialize_database_pool(config)?;
            info!("Using key/value blood pressure repository on {}", get_connection_info(&pool));
            Ok(Arc::new(KeyValueBloodPressureRepository::new(SqliteKeyValueStore::new(pool))))
        }
    }
}

fn parse_created_at(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// Ordering key for `createdAt`: the parsed instant, then the raw text.
///
/// `None` sorts below every instant, so unparsable timestamps end up last in a descending list.
fn created_at_key(value: &str) -> (Option<DateTime<FixedOffset>>, &str) {
    (parse_created_at(value), value)
}

/// Map stored records to readings ordered by `createdAt` descending
pub(crate) fn to_sorted_readings(records: &[BloodPressureRecordModel]) -> Vec<BloodPressureReading> {
    let mut sorted: Vec<&BloodPressureRecordModel> = records.iter().collect();
    sorted.sort_by(|a, b| created_at_key(&b.created_at).cmp(&created_at_key(&a.created_at)));
    sorted.into_iter().map(to_reading_ui).collect()
}

/// Build a record for `reading` whose `createdAt` does not collide with `existing`.
///
/// Colliding timestamps move forward one millisecond at a time.
pub(crate) fn new_unique_record(
    existing: &[BloodPressureRecordModel],
    reading: &BloodPressureReading,
) -> Result<BloodPressureRecordModel, RepositoryError> {
    let mut record = to_record_model(reading)?;

    if let Some(mut created_at) = parse_created_at(&record.created_at) {
        while existing.iter().any(|r| r.created_at == record.created_at) {
            debug!("createdAt {} already stored, advancing by 1ms", record.created_at);
            created_at += Duration::milliseconds(1);
            record.created_at = created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        }
    }

    Ok(record)
}

/// Replace the measurements of the record identified by `id`, keeping its `createdAt`
pub(crate) fn replace_record(
    records: &mut [BloodPressureRecordModel],
    id: &str,
    reading: &BloodPressureReading,
) -> Result<BloodPressureRecordModel, RepositoryError> {
    let index = records
        .iter()
        .position(|r| r.created_at == id)
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

    let mut updated = to_record_model(reading)?;
    updated.created_at = records[index].created_at.clone();
    records[index] = updated.clone();

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created_at: &str) -> BloodPressureRecordModel {
        BloodPressureRecordModel {
            sys: 120.0,
            dia: 80.0,
            ppm: 70.0,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_to_sorted_readings_orders_by_time_not_text() {
        // Offsets differ, so plain string order would be wrong
        let records = vec![
            record("2024-05-01T10:00:00.000Z"),
            record("2024-05-01T12:30:00.000+02:00"),
            record("2024-05-01T11:00:00.000Z"),
        ];

        let ids: Vec<String> = to_sorted_readings(&records).into_iter().map(|r| r.id).collect();

        assert_eq!(
            ids,
            vec![
                "2024-05-01T11:00:00.000Z",
                "2024-05-01T12:30:00.000+02:00",
                "2024-05-01T10:00:00.000Z",
            ]
        );
    }

    #[test]
    fn test_to_sorted_readings_mixed_and_unparsable_timestamps() {
        // Enough records to go past the insertion-sort threshold of the std sort
        let mut records = Vec::new();
        for day in 1..=12 {
            records.push(record(&format!("2024-05-{:02}T08:00:00.000Z", day)));
            records.push(record(&format!("2024-05-{:02}T09:30:00.000+02:00", day)));
            records.push(record(&format!("2024-05-{:02}T09:45", day)));
        }
        records.push(record("not a date"));
        records.reverse();
        records.swap(3, 30);
        records.swap(7, 21);

        let ids: Vec<String> = to_sorted_readings(&records).into_iter().map(|r| r.id).collect();

        assert_eq!(ids.len(), 37);
        assert_eq!(ids[0], "2024-05-12T08:00:00.000Z");
        assert_eq!(ids[1], "2024-05-12T09:30:00.000+02:00");
        assert_eq!(ids[23], "2024-05-01T09:30:00.000+02:00");
        assert_eq!(ids[24], "not a date");
        assert_eq!(ids[25], "2024-05-12T09:45");
        assert_eq!(ids[36], "2024-05-01T09:45");
    }

    #[test]
    fn test_same_instant_different_offsets_sort_deterministically() {
        let forward = vec![
            record("2024-05-01T10:00:00.000Z"),
            record("2024-05-01T12:00:00.000+02:00"),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let a: Vec<String> = to_sorted_readings(&forward).into_iter().map(|r| r.id).collect();
        let b: Vec<String> = to_sorted_readings(&backward).into_iter().map(|r| r.id).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn test_new_unique_record_skips_taken_timestamps() {
        let reading = BloodPressureReading::from_values("120", "80", "70");
        let first = new_unique_record(&[], &reading).unwrap();

        let existing = vec![first.clone()];
        let second = new_unique_record(&existing, &reading).unwrap();

        assert_ne!(first.created_at, second.created_at);
        assert!(created_at_key(&second.created_at) > created_at_key(&first.created_at));
    }

    #[test]
    fn test_replace_record_keeps_identity() {
        let mut records = vec![record("2024-05-01T10:00:00.000Z")];
        let reading = BloodPressureReading::from_values("130", "85", "72");

        let updated = replace_record(&mut records, "2024-05-01T10:00:00.000Z", &reading).unwrap();

        assert_eq!(updated.created_at, "2024-05-01T10:00:00.000Z");
        assert_eq!(records[0].sys, 130.0);
    }

    #[test]
    fn test_replace_record_unknown_id() {
        let mut records = vec![record("2024-05-01T10:00:00.000Z")];
        let reading = BloodPressureReading::from_values("130", "85", "72");

        let err = replace_record(&mut records, "missing", &reading).unwrap_err();

        assert!(err.to_string().contains("Reading not found"));
        assert_eq!(records, vec![record("2024-05-01T10:00:00.000Z")]);
    }
}

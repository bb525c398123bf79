use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_tracker_domain::entities::blood_pressure::{
    BloodPressureFormValues, BloodPressureReading as DomainBloodPressureReading,
    BloodPressureRecordModel,
};

/// Public representation of a blood pressure reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureReading {
    /// Identifier of the reading; the record's creation time
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: Option<String>,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: Option<String>,

    /// Pulse rate in beats per minute
    pub pulse: Option<String>,

    /// When the reading was taken, formatted for display
    pub created_at: String,
}

/// Public representation of a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureRecord {
    /// Systolic blood pressure
    pub sys: f64,

    /// Diastolic blood pressure
    pub dia: f64,

    /// Pulse per minute
    pub ppm: f64,

    /// RFC 3339 creation time; also the record identifier
    pub created_at: String,
}

/// Request payload for extracting a reading from a photo
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractReadingRequest {
    /// Base64-encoded JPEG, optionally as a `data:` URL
    pub image_base64: String,
}

/// Reading extracted from a photo, with form values when every measurement is usable
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractReadingResponse {
    pub reading: BloodPressureReading,

    /// `null` when a measurement is missing or not a positive integer
    pub form_values: Option<BloodPressureFormValues>,
}

impl From<DomainBloodPressureReading> for BloodPressureReading {
    fn from(reading: DomainBloodPressureReading) -> Self {
        Self {
            id: reading.id,
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            pulse: reading.pulse,
            created_at: reading.created_at,
        }
    }
}

impl From<BloodPressureRecordModel> for BloodPressureRecord {
    fn from(record: BloodPressureRecordModel) -> Self {
        Self {
            sys: record.sys,
            dia: record.dia,
            ppm: record.ppm,
            created_at: record.created_at,
        }
    }
}

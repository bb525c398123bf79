use serde::{Deserialize, Deserializer, Serialize};

/// Domain-facing blood pressure reading.
///
/// Measurements are kept as text so they can round-trip through form inputs,
/// and are `None` when a value has not been extracted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureReading {
    /// Identifier of the reading; the originating record's `createdAt` once stored
    #[serde(default)]
    pub id: String,

    /// Systolic blood pressure (the higher number)
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub systolic: Option<String>,

    /// Diastolic blood pressure (the lower number)
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub diastolic: Option<String>,

    /// Pulse rate in beats per minute
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub pulse: Option<String>,

    /// When the reading was taken, formatted for display
    #[serde(default)]
    pub created_at: String,
}

impl BloodPressureReading {
    /// Build a reading from three textual measurements with no id or timestamp
    pub fn from_values(systolic: &str, diastolic: &str, pulse: &str) -> Self {
        Self {
            id: String::new(),
            systolic: Some(systolic.to_string()),
            diastolic: Some(diastolic.to_string()),
            pulse: Some(pulse.to_string()),
            created_at: String::new(),
        }
    }
}

/// Storage model for a blood pressure record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureRecordModel {
    /// Systolic blood pressure
    pub sys: f64,

    /// Diastolic blood pressure
    pub dia: f64,

    /// Pulse per minute
    pub ppm: f64,

    /// RFC 3339 creation time; doubles as the record identifier
    pub created_at: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMeasurement {
    Number(serde_json::Number),
    Text(String),
}

/// Accept a measurement written as a JSON string, number, or null.
///
/// Numbers keep their JSON text form, so `118` becomes `"118"`.
pub fn deserialize_measurement<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMeasurement>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        RawMeasurement::Number(number) => number.to_string(),
        RawMeasurement::Text(text) => text,
    }))
}

use chrono::{DateTime, Local, SecondsFormat, Utc};
use thiserror::Error;

use crate::models::blood_pressure::{BloodPressureReading, BloodPressureRecordModel};

/// Display format for reading timestamps, e.g. `09:05 PM-01/05/2024`
pub const DISPLAY_DATE_FORMAT: &str = "%I:%M %p-%d/%m/%Y";

/// Error raised when a reading cannot be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// One of systolic, diastolic or pulse is missing or not a finite number
    #[error("Invalid numeric value provided. Cannot create record.")]
    InvalidNumericValue,
}

/// Current UTC time as RFC 3339 with millisecond precision
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a textual measurement into a finite number.
///
/// Surrounding whitespace is ignored. Missing, empty and non-numeric values
/// yield `None`; there is no coercion to zero.
pub fn parse_measurement(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Convert a domain reading into a storage record stamped with the current time
pub fn to_record_model(reading: &BloodPressureReading) -> Result<BloodPressureRecordModel, MappingError> {
    let sys = parse_measurement(reading.systolic.as_deref());
    let dia = parse_measurement(reading.diastolic.as_deref());
    let ppm = parse_measurement(reading.pulse.as_deref());

    match (sys, dia, ppm) {
        (Some(sys), Some(dia), Some(ppm)) => Ok(BloodPressureRecordModel {
            sys,
            dia,
            ppm,
            created_at: current_timestamp(),
        }),
        _ => Err(MappingError::InvalidNumericValue),
    }
}

/// Convert a storage record into a reading for display.
///
/// The reading's id is the record's `createdAt`. A timestamp that does not
/// parse is passed through as-is.
pub fn to_reading_ui(record: &BloodPressureRecordModel) -> BloodPressureReading {
    let created_at = DateTime::parse_from_rfc3339(&record.created_at)
        .map(|date| date.with_timezone(&Local).format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| record.created_at.clone());

    BloodPressureReading {
        id: record.created_at.clone(),
        systolic: Some(record.sys.to_string()),
        diastolic: Some(record.dia.to_string()),
        pulse: Some(record.ppm.to_string()),
        created_at,
    }
}

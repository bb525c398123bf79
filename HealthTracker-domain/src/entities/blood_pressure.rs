use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use health_tracker_data::models::blood_pressure::deserialize_measurement;

pub use health_tracker_data::models::blood_pressure::{BloodPressureReading, BloodPressureRecordModel};

pub const SYSTOLIC_REQUIRED: &str = "Systolic pressure is required";
pub const DIASTOLIC_REQUIRED: &str = "Diastolic pressure is required";
pub const PULSE_REQUIRED: &str = "Pulse is required";
pub const MUST_BE_NUMBER: &str = "The value must be a number";
pub const MUST_BE_POSITIVE: &str = "The value must be positive";
pub const MUST_BE_INTEGER: &str = "The value must be an integer";

/// Values of the blood pressure form, ready to be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureFormValues {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 1, message = "The value must be positive"))]
    pub sys: u32,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 1, message = "The value must be positive"))]
    pub dia: u32,

    /// Pulse per minute
    #[validate(range(min = 1, message = "The value must be positive"))]
    pub ppm: u32,
}

/// Raw form submission; each field may be a string, a number, or missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureFormInput {
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub sys: Option<String>,

    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub dia: Option<String>,

    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub ppm: Option<String>,
}

impl BloodPressureFormInput {
    pub fn new(sys: &str, dia: &str, ppm: &str) -> Self {
        Self {
            sys: Some(sys.to_string()),
            dia: Some(dia.to_string()),
            ppm: Some(ppm.to_string()),
        }
    }
}

impl From<BloodPressureFormValues> for BloodPressureFormInput {
    fn from(values: BloodPressureFormValues) -> Self {
        Self {
            sys: Some(values.sys.to_string()),
            dia: Some(values.dia.to_string()),
            ppm: Some(values.ppm.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_values_validation() {
        let valid = BloodPressureFormValues { sys: 120, dia: 80, ppm: 70 };
        assert!(valid.validate().is_ok());

        let invalid = BloodPressureFormValues { sys: 0, dia: 80, ppm: 70 };
        let errors = invalid.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let sys_errors = field_errors.get("sys").unwrap();
        assert_eq!(sys_errors[0].message.as_deref(), Some(MUST_BE_POSITIVE));
    }

    #[test]
    fn test_form_input_accepts_numbers_and_strings() {
        let input: BloodPressureFormInput =
            serde_json::from_str(r#"{"sys":120,"dia":"80"}"#).unwrap();

        assert_eq!(input.sys.as_deref(), Some("120"));
        assert_eq!(input.dia.as_deref(), Some("80"));
        assert_eq!(input.ppm, None);
    }
}

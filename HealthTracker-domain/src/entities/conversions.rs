use std::borrow::Cow;

use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors};

use health_tracker_data::mappers::current_timestamp;
use crate::entities::blood_pressure::{
    BloodPressureFormInput, BloodPressureFormValues, BloodPressureReading, DIASTOLIC_REQUIRED,
    MUST_BE_INTEGER, MUST_BE_NUMBER, MUST_BE_POSITIVE, PULSE_REQUIRED, SYSTOLIC_REQUIRED,
};

// Conversion functions between domain readings and form values.
// Record conversions live next to the repositories in the data layer.

/// Convert a reading into form values.
///
/// Lenient: a missing reading gives `None`, and so does any measurement
/// that is not a positive integer.
pub fn to_form_values(reading: Option<&BloodPressureReading>) -> Option<BloodPressureFormValues> {
    let reading = reading?;

    let values = (
        form_number(reading.systolic.as_deref()),
        form_number(reading.diastolic.as_deref()),
        form_number(reading.pulse.as_deref()),
    );

    match values {
        (Some(sys), Some(dia), Some(ppm)) => Some(BloodPressureFormValues { sys, dia, ppm }),
        _ => {
            warn!(
                "Reading {:?}/{:?}/{:?} cannot be shown as form values",
                reading.systolic, reading.diastolic, reading.pulse
            );
            None
        }
    }
}

fn form_number(value: Option<&str>) -> Option<u32> {
    let number = value?.trim().parse::<f64>().ok()?;
    if number.is_finite() && number > 0.0 && number.fract() == 0.0 && number <= u32::MAX as f64 {
        Some(number as u32)
    } else {
        None
    }
}

/// Convert form values into a new reading stamped with the current time
pub fn to_reading(values: &BloodPressureFormValues) -> BloodPressureReading {
    BloodPressureReading {
        id: String::new(),
        systolic: Some(values.sys.to_string()),
        diastolic: Some(values.dia.to_string()),
        pulse: Some(values.ppm.to_string()),
        created_at: current_timestamp(),
    }
}

/// Validate a raw form submission.
///
/// Each field reports at most one message, checking in order that the value
/// is a number, is present, is positive and is an integer.
pub fn parse_form_input(input: &BloodPressureFormInput) -> Result<BloodPressureFormValues, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let sys = check_field(&mut errors, "sys", input.sys.as_deref(), SYSTOLIC_REQUIRED);
    let dia = check_field(&mut errors, "dia", input.dia.as_deref(), DIASTOLIC_REQUIRED);
    let ppm = check_field(&mut errors, "ppm", input.ppm.as_deref(), PULSE_REQUIRED);

    match (sys, dia, ppm) {
        (Some(sys), Some(dia), Some(ppm)) if errors.is_empty() => {
            let values = BloodPressureFormValues { sys, dia, ppm };
            values.validate()?;
            Ok(values)
        }
        _ => Err(errors),
    }
}

fn check_field(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    required_message: &'static str,
) -> Option<u32> {
    let text = value.map(str::trim).unwrap_or_default();

    let failure = if text.is_empty() {
        Some(("required", required_message))
    } else {
        match text.parse::<f64>() {
            Ok(number) if !number.is_finite() => Some(("number", MUST_BE_NUMBER)),
            Ok(number) if number <= 0.0 => Some(("positive", MUST_BE_POSITIVE)),
            Ok(number) if number.fract() != 0.0 => Some(("integer", MUST_BE_INTEGER)),
            Ok(number) if number > u32::MAX as f64 => Some(("number", MUST_BE_NUMBER)),
            Ok(number) => return Some(number as u32),
            Err(_) => Some(("number", MUST_BE_NUMBER)),
        }
    };

    if let Some((code, message)) = failure {
        let mut error = ValidationError::new(code);
        error.message = Some(Cow::Borrowed(message));
        errors.add(field, error);
    }
    None
}

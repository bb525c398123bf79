// Conversions between readings and storage records
pub mod blood_pressure;

pub use blood_pressure::{
    current_timestamp, parse_measurement, to_reading_ui, to_record_model, MappingError,
    DISPLAY_DATE_FORMAT,
};

// Storage and domain-facing data shapes
pub mod blood_pressure;

// Re-export common types for easier imports
pub use blood_pressure::{BloodPressureReading, BloodPressureRecordModel};

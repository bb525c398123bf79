// Public entities for the HealthTracker API
// This module contains data structures that are shared across the application boundary

// Blood pressure readings, records and extraction payloads
pub mod blood_pressure;

// Common entities for error handling
pub mod common;

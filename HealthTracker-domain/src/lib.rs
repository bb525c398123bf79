// HealthTracker Domain
// This crate contains the business logic for the HealthTracker application

// Use-cases that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Re-export the lower layers for convenience
pub use health_tracker_data::{gemini, repository};

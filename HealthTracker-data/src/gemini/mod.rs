// Gemini image extraction
pub mod client;
pub mod prompts;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::blood_pressure::BloodPressureReading;

pub use client::{
    extract_json_text, parse_generate_content_response, strip_data_url_prefix, GeminiClient, GeminiConfig,
};

/// Errors from the image extraction API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The reply did not contain a usable reading
    #[error("Could not parse a valid response from the API.")]
    InvalidResponse,

    /// The request failed, with the HTTP status when one was received
    #[error("API request failed with status {}.", status_label(.status))]
    RequestFailed { status: Option<u16> },

    /// The client is not configured to call the API
    #[error("API configuration error: {0}")]
    Configuration(String),
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

/// Source of readings extracted from a photo of a monitor
#[async_trait]
pub trait ReadingExtractor {
    /// Extract systolic, diastolic and pulse from a base64-encoded JPEG
    async fn get_readings_from_image(&self, image_base64: &str) -> Result<BloodPressureReading, ApiError>;
}

/// Extractor handle shared across the application
pub type SharedReadingExtractor = Arc<dyn ReadingExtractor + Send + Sync>;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::models::blood_pressure::BloodPressureReading;
use super::prompts::{EXTRACT_BLOOD_PRESSURE_PROMPT, IMAGE_MIME_TYPE, RESPONSE_MIME_TYPE};
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use super::{ApiError, ReadingExtractor};

/// Default Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for extraction
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Gemini client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API key; extraction calls fail until one is set
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-2.0-flash-001`
    pub model: String,
    /// Base URL of the REST API
    pub base_url: String,
    /// Request timeout; the transport default applies when unset
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl GeminiConfig {
    /// Read the configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_seconds = lookup("GEMINI_TIMEOUT_SECONDS").and_then(|value| {
            let parsed = value.parse::<u64>().ok();
            if parsed.is_none() {
                warn!("Ignoring invalid GEMINI_TIMEOUT_SECONDS: {}", value);
            }
            parsed
        });

        Self {
            api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: lookup("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout_seconds,
        }
    }

    /// URL of the `generateContent` method for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Reading extractor calling the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a client from its configuration
    pub fn new(config: GeminiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        if config.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; image extraction will fail");
        }
        info!("Gemini client configured for model {}", config.model);

        Ok(Self { config, client })
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

/// Build the extraction request for a base64 JPEG
pub fn build_request(image_base64: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: EXTRACT_BLOOD_PRESSURE_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: IMAGE_MIME_TYPE.to_string(),
                        data: strip_data_url_prefix(image_base64).to_string(),
                    },
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        }),
    }
}

/// Drop a `data:<mime>;base64,` prefix, as produced by browser file readers
pub fn strip_data_url_prefix(image: &str) -> &str {
    if image.starts_with("data:") {
        if let Some(index) = image.find(";base64,") {
            return &image[index + ";base64,".len()..];
        }
    }
    image
}

/// Remove Markdown code fences around a JSON reply
pub fn extract_json_text(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Turn the first candidate's text into a reading
pub fn parse_generate_content_response(
    response: &GenerateContentResponse,
) -> Result<BloodPressureReading, ApiError> {
    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .filter(|text| !text.trim().is_empty())
        .ok_or(ApiError::InvalidResponse)?;

    let json = extract_json_text(text);
    debug!("Extracted JSON string: {}", json);

    serde_json::from_str::<BloodPressureReading>(&json).map_err(|e| {
        warn!("Gemini reply is not a reading: {}", e);
        ApiError::InvalidResponse
    })
}

#[async_trait]
impl ReadingExtractor for GeminiClient {
    async fn get_readings_from_image(&self, image_base64: &str) -> Result<BloodPressureReading, ApiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("GEMINI_API_KEY is not set".to_string()))?;

        let request = build_request(image_base64);
        let url = self.config.endpoint();

        debug!("Calling Gemini at {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("Gemini request failed: {}", e);
                ApiError::RequestFailed {
                    status: e.status().map(|status| status.as_u16()),
                }
            })?;

        let body = response.json::<GenerateContentResponse>().await.map_err(|e| {
            error!("Gemini reply could not be decoded: {}", e);
            ApiError::InvalidResponse
        })?;

        parse_generate_content_response(&body)
    }
}

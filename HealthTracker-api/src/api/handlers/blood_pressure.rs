use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

// Import domain entities and services
use health_tracker_domain::entities::blood_pressure::BloodPressureFormInput;
use health_tracker_domain::entities::conversions::{parse_form_input, to_form_values, to_reading};
use health_tracker_domain::services::{BloodPressureServiceError, BloodPressureUseCases};

// Import our entities
use crate::entities::blood_pressure::{
    BloodPressureReading, BloodPressureRecord, ExtractReadingRequest, ExtractReadingResponse,
};
use crate::entities::common::{field_messages, PublicErrorResponse};
use crate::report::render_report;

/// Error response format for API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(message: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an error response for a failed call to the extraction API
    pub fn upstream_error(message: &str) -> Self {
        Self {
            error: "upstream_error".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<BloodPressureServiceError> for ErrorResponse {
    fn from(err: BloodPressureServiceError) -> Self {
        let message = err.to_string();
        match err {
            BloodPressureServiceError::ValidationError(message) => {
                warn!("Invalid blood pressure reading data: {}", message);
                Self::validation_error(&message, None)
            }
            BloodPressureServiceError::NotFound(id) => {
                info!("Blood pressure reading not found: {}", id);
                Self {
                    details: Some(serde_json::json!({ "id": id })),
                    ..Self::not_found(&message)
                }
            }
            BloodPressureServiceError::InvalidImageData => Self::bad_request(&message),
            BloodPressureServiceError::Api(api_error) => {
                error!("Extraction API error: {}", api_error);
                Self::upstream_error(&api_error.to_string())
            }
            BloodPressureServiceError::RepositoryError(message) => {
                error!("Error accessing blood pressure records: {}", message);
                Self::internal_error()
            }
        }
    }
}

/// Use-cases shared by the handlers
pub type BloodPressureService = BloodPressureUseCases;

fn form_to_reading(input: &BloodPressureFormInput) -> Result<health_tracker_domain::entities::BloodPressureReading, ErrorResponse> {
    let values = parse_form_input(input).map_err(|errors| {
        let details = serde_json::to_value(field_messages(&errors)).ok();
        warn!("Rejected blood pressure form: {:?}", details);
        ErrorResponse::validation_error("Invalid blood pressure form", details)
    })?;

    Ok(to_reading(&values))
}

/// Get all blood pressure readings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure",
    responses(
        (status = 200, description = "Blood pressure readings", body = Vec<BloodPressureReading>),
        (status = 500, description = "Internal server error", body = PublicErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn get_blood_pressure_history(
    State(service): State<BloodPressureService>,
) -> Result<Json<Vec<BloodPressureReading>>, ErrorResponse> {
    let readings = service.get_all.execute().await?;
    info!("Returning {} blood pressure readings", readings.len());

    Ok(Json(readings.into_iter().map(BloodPressureReading::from).collect()))
}

/// Create a new blood pressure record from form values
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure",
    request_body = BloodPressureFormInput,
    responses(
        (status = 201, description = "Blood pressure record created", body = BloodPressureRecord),
        (status = 400, description = "Invalid form values", body = PublicErrorResponse),
        (status = 500, description = "Internal server error", body = PublicErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, input))]
pub async fn create_blood_pressure(
    State(service): State<BloodPressureService>,
    Json(input): Json<BloodPressureFormInput>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!("Creating new blood pressure record");

    let reading = form_to_reading(&input)?;
    let record = service.save.execute(reading).await?;

    Ok((StatusCode::CREATED, Json(BloodPressureRecord::from(record))))
}

/// Replace the measurements of an existing record
#[utoipa::path(
    put,
    path = "/api/v1/bloodpressure/{id}",
    params(
        ("id" = String, Path, description = "Record identifier (its createdAt timestamp)")
    ),
    request_body = BloodPressureFormInput,
    responses(
        (status = 200, description = "Blood pressure record updated", body = BloodPressureRecord),
        (status = 400, description = "Invalid form values", body = PublicErrorResponse),
        (status = 404, description = "Blood pressure record not found", body = PublicErrorResponse),
        (status = 500, description = "Internal server error", body = PublicErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, input))]
pub async fn update_blood_pressure(
    State(service): State<BloodPressureService>,
    Path(id): Path<String>,
    Json(input): Json<BloodPressureFormInput>,
) -> Result<Json<BloodPressureRecord>, ErrorResponse> {
    let reading = form_to_reading(&input)?;
    let record = service.update.execute(&id, reading).await?;

    Ok(Json(BloodPressureRecord::from(record)))
}

/// Delete a record; unknown ids are ignored
#[utoipa::path(
    delete,
    path = "/api/v1/bloodpressure/{id}",
    params(
        ("id" = String, Path, description = "Record identifier (its createdAt timestamp)")
    ),
    responses(
        (status = 204, description = "Blood pressure record deleted"),
        (status = 500, description = "Internal server error", body = PublicErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn delete_blood_pressure(
    State(service): State<BloodPressureService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    service.delete.execute(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Extract a reading from a photo of a blood pressure monitor
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure/extract",
    request_body = ExtractReadingRequest,
    responses(
        (status = 200, description = "Reading extracted", body = ExtractReadingResponse),
        (status = 400, description = "Invalid image data", body = PublicErrorResponse),
        (status = 502, description = "Extraction API failed", body = PublicErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, request))]
pub async fn extract_blood_pressure(
    State(service): State<BloodPressureService>,
    Json(request): Json<ExtractReadingRequest>,
) -> Result<Json<ExtractReadingResponse>, ErrorResponse> {
    let reading = service.extract.execute(&request.image_base64).await?;
    let form_values = to_form_values(Some(&reading));

    Ok(Json(ExtractReadingResponse {
        reading: BloodPressureReading::from(reading),
        form_values,
    }))
}

/// Printable HTML history of all readings
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure/report",
    responses(
        (status = 200, description = "HTML report", content_type = "text/html", body = String),
        (status = 500, description = "Internal server error", body = PublicErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn get_blood_pressure_report(
    State(service): State<BloodPressureService>,
) -> Result<Html<String>, ErrorResponse> {
    let readings = service.get_all.execute().await?;

    Ok(Html(render_report(&readings)))
}

use thiserror::Error;
use tracing::{debug, error, info};

use crate::entities::blood_pressure::{BloodPressureReading, BloodPressureRecordModel};
use health_tracker_data::gemini::{strip_data_url_prefix, ApiError, SharedReadingExtractor};
use health_tracker_data::repository::{RepositoryError, SharedBloodPressureRepository};

/// Shortest base64 payload accepted as an image
pub const MIN_IMAGE_DATA_LENGTH: usize = 100;

/// Blood pressure service errors
#[derive(Debug, Error)]
pub enum BloodPressureServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Image payload rejected before extraction
    #[error("Invalid image data provided")]
    InvalidImageData,

    /// Extraction API error
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Map repository errors to service errors
fn map_repo_error(err: RepositoryError) -> BloodPressureServiceError {
    match err {
        RepositoryError::NotFound(id) => BloodPressureServiceError::NotFound(id),
        RepositoryError::Mapping(e) => BloodPressureServiceError::ValidationError(e.to_string()),
        _ => {
            error!("Repository failure: {}", err);
            BloodPressureServiceError::RepositoryError(err.to_string())
        }
    }
}

/// Save a reading as a new record
#[derive(Clone)]
pub struct SaveBloodPressureUseCase {
    repository: SharedBloodPressureRepository,
}

impl SaveBloodPressureUseCase {
    pub fn new(repository: SharedBloodPressureRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, reading: BloodPressureReading) -> Result<BloodPressureRecordModel, BloodPressureServiceError> {
        let record = self.repository.save(reading).await.map_err(map_repo_error)?;
        info!("Saved blood pressure record {}", record.created_at);
        Ok(record)
    }
}

/// List every reading, newest first
#[derive(Clone)]
pub struct GetAllBloodPressureReadingsUseCase {
    repository: SharedBloodPressureRepository,
}

impl GetAllBloodPressureReadingsUseCase {
    pub fn new(repository: SharedBloodPressureRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<BloodPressureReading>, BloodPressureServiceError> {
        self.repository.get_all().await.map_err(map_repo_error)
    }
}

/// Replace the measurements of an existing record
#[derive(Clone)]
pub struct UpdateBloodPressureRecordUseCase {
    repository: SharedBloodPressureRepository,
}

impl UpdateBloodPressureRecordUseCase {
    pub fn new(repository: SharedBloodPressureRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        id: &str,
        reading: BloodPressureReading,
    ) -> Result<BloodPressureRecordModel, BloodPressureServiceError> {
        let record = self.repository.update(id, reading).await.map_err(map_repo_error)?;
        info!("Updated blood pressure record {}", record.created_at);
        Ok(record)
    }
}

/// Delete a record by id
#[derive(Clone)]
pub struct DeleteBloodPressureRecordUseCase {
    repository: SharedBloodPressureRepository,
}

impl DeleteBloodPressureRecordUseCase {
    pub fn new(repository: SharedBloodPressureRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<(), BloodPressureServiceError> {
        self.repository.delete(id).await.map_err(map_repo_error)?;
        info!("Deleted blood pressure record {}", id);
        Ok(())
    }
}

/// Extract a reading from a photo of a monitor.
///
/// A `data:...;base64,` prefix is removed first. Payloads that are then empty or
/// shorter than [`MIN_IMAGE_DATA_LENGTH`] are rejected without calling the extractor.
#[derive(Clone)]
pub struct ExtractReadingsFromImageUseCase {
    extractor: SharedReadingExtractor,
}

impl ExtractReadingsFromImageUseCase {
    pub fn new(extractor: SharedReadingExtractor) -> Self {
        Self { extractor }
    }

    pub async fn execute(&self, image_base64: &str) -> Result<BloodPressureReading, BloodPressureServiceError> {
        let payload = strip_data_url_prefix(image_base64);
        if payload.is_empty() || payload.len() < MIN_IMAGE_DATA_LENGTH {
            debug!("Rejecting image payload of {} bytes", payload.len());
            return Err(BloodPressureServiceError::InvalidImageData);
        }

        self.extractor
            .get_readings_from_image(payload)
            .await
            .map_err(|e| {
                error!("Image extraction failed: {}", e);
                BloodPressureServiceError::from(e)
            })
    }
}

/// The blood pressure use-cases, built once at startup
#[derive(Clone)]
pub struct BloodPressureUseCases {
    pub save: SaveBloodPressureUseCase,
    pub get_all: GetAllBloodPressureReadingsUseCase,
    pub update: UpdateBloodPressureRecordUseCase,
    pub delete: DeleteBloodPressureRecordUseCase,
    pub extract: ExtractReadingsFromImageUseCase,
}

impl BloodPressureUseCases {
    pub fn new(repository: SharedBloodPressureRepository, extractor: SharedReadingExtractor) -> Self {
        Self {
            save: SaveBloodPressureUseCase::new(repository.clone()),
            get_all: GetAllBloodPressureReadingsUseCase::new(repository.clone()),
            update: UpdateBloodPressureRecordUseCase::new(repository.clone()),
            delete: DeleteBloodPressureRecordUseCase::new(repository),
            extract: ExtractReadingsFromImageUseCase::new(extractor),
        }
    }
}

pub mod blood_pressure;

// Domain services
// Each use-case wraps one operation on an injected collaborator.

pub use blood_pressure::{
    BloodPressureServiceError, BloodPressureUseCases, DeleteBloodPressureRecordUseCase,
    ExtractReadingsFromImageUseCase, GetAllBloodPressureReadingsUseCase, SaveBloodPressureUseCase,
    UpdateBloodPressureRecordUseCase, MIN_IMAGE_DATA_LENGTH,
};

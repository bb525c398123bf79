use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use health_tracker_domain::services::BloodPressureUseCases;
use crate::api::handlers::blood_pressure;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(use_cases: BloodPressureUseCases) -> Router {
    debug!("Creating application router");

    // Static segments are registered before the parametrized route
    let api_routes = Router::new()
        .route("/bloodpressure", get(blood_pressure::get_blood_pressure_history)
                               .post(blood_pressure::create_blood_pressure))
        .route("/bloodpressure/report", get(blood_pressure::get_blood_pressure_report))
        .route("/bloodpressure/extract", post(blood_pressure::extract_blood_pressure))
        .route("/bloodpressure/:id", put(blood_pressure::update_blood_pressure)
                                   .delete(blood_pressure::delete_blood_pressure));

    debug!("API routes configured");

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .with_state(use_cases);

    debug!("API routes nested");

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    configure_layers(app)
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}

/// Apply CORS and request tracing to the whole application
pub fn configure_layers(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    app.layer(cors).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use health_tracker_data::gemini::{ApiError, ReadingExtractor, SharedReadingExtractor};
    use health_tracker_data::repository::{InMemoryBloodPressureRepository, InMemoryStore};
    use health_tracker_domain::entities::BloodPressureReading;

    /// Extractor returning a fixed outcome without network access
    pub struct StubExtractor {
        pub result: Result<BloodPressureReading, ApiError>,
    }

    #[async_trait]
    impl ReadingExtractor for StubExtractor {
        async fn get_readings_from_image(&self, _image_base64: &str) -> Result<BloodPressureReading, ApiError> {
            self.result.clone()
        }
    }

    /// Create a test application over an in-memory store
    pub fn create_test_app(result: Result<BloodPressureReading, ApiError>) -> Router {
        let repository = Arc::new(InMemoryBloodPressureRepository::new(InMemoryStore::new()));
        let extractor: SharedReadingExtractor = Arc::new(StubExtractor { result });

        create_app(BloodPressureUseCases::new(repository, extractor))
    }
}

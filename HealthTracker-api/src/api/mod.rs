pub mod handlers;
pub mod routes;

use axum::Router;
use health_tracker_domain::services::BloodPressureUseCases;

/// Create the application router
pub fn create_application(use_cases: BloodPressureUseCases) -> Router {
    routes::create_app(use_cases)
}

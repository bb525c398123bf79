use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Blood pressure endpoints
        crate::api::handlers::blood_pressure::get_blood_pressure_history,
        crate::api::handlers::blood_pressure::create_blood_pressure,
        crate::api::handlers::blood_pressure::update_blood_pressure,
        crate::api::handlers::blood_pressure::delete_blood_pressure,
        crate::api::handlers::blood_pressure::extract_blood_pressure,
        crate::api::handlers::blood_pressure::get_blood_pressure_report,
    ),
    components(
        schemas(
            // Entities
            crate::entities::blood_pressure::BloodPressureReading,
            crate::entities::blood_pressure::BloodPressureRecord,
            crate::entities::blood_pressure::ExtractReadingRequest,
            crate::entities::blood_pressure::ExtractReadingResponse,
            crate::entities::common::PublicErrorResponse,

            // Form payloads
            health_tracker_domain::entities::blood_pressure::BloodPressureFormInput,
            health_tracker_domain::entities::blood_pressure::BloodPressureFormValues,

            // Blood pressure handlers
            crate::api::handlers::blood_pressure::ErrorResponse,
        )
    ),
    tags(
        (name = "blood_pressure", description = "Blood pressure management endpoints")
    ),
    info(
        title = "HealthTracker API",
        version = "0.1.0",
        description = "API for recording blood pressure readings and extracting them from monitor photos",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "HealthTracker API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "blood_pressure"));

        assert!(openapi.paths.paths.contains_key("/api/v1/bloodpressure"));
        assert!(openapi.paths.paths.contains_key("/api/v1/bloodpressure/{id}"));
        assert!(openapi.paths.paths.contains_key("/api/v1/bloodpressure/extract"));
        assert!(openapi.paths.paths.contains_key("/api/v1/bloodpressure/report"));
    }

    #[test]
    fn test_schemas_are_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("BloodPressureFormInput"));
        assert!(schemas.contains_key("ExtractReadingResponse"));
    }
}

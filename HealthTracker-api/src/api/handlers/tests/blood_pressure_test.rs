#[cfg(test)]
mod blood_pressure_tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use health_tracker_data::gemini::ApiError;
    use health_tracker_domain::entities::BloodPressureReading;
    use crate::api::routes::tests::create_test_app;

    fn long_image() -> String {
        "A".repeat(128)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send(app, request).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    fn no_extraction() -> Result<BloodPressureReading, ApiError> {
        Err(ApiError::InvalidResponse)
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = create_test_app(no_extraction());

        let (status, record) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure", json!({"sys": "120", "dia": 80, "ppm": "75"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record["sys"], 120.0);
        assert!(record["createdAt"].is_string());

        let (status, readings) = send_json(&app, empty_request(Method::GET, "/api/v1/bloodpressure")).await;
        assert_eq!(status, StatusCode::OK);
        let readings = readings.as_array().unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0]["id"], record["createdAt"]);
        assert_eq!(readings[0]["systolic"], "120");
        assert_eq!(readings[0]["diastolic"], "80");
        assert_eq!(readings[0]["pulse"], "75");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form() {
        let app = create_test_app(no_extraction());

        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure", json!({"sys": "abc", "dia": "-1"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"]["sys"], "The value must be a number");
        assert_eq!(body["details"]["dia"], "The value must be positive");
        assert_eq!(body["details"]["ppm"], "Pulse is required");

        let (_, readings) = send_json(&app, empty_request(Method::GET, "/api/v1/bloodpressure")).await;
        assert_eq!(readings.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = create_test_app(no_extraction());

        let (_, record) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure", json!({"sys": 120, "dia": 80, "ppm": 75})),
        )
        .await;
        let id = record["createdAt"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/bloodpressure/{}", id);

        let (status, updated) = send_json(
            &app,
            json_request(Method::PUT, &uri, json!({"sys": 135, "dia": 85, "ppm": 70})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["createdAt"], id.as_str());
        assert_eq!(updated["sys"], 135.0);

        let (status, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, readings) = send_json(&app, empty_request(Method::GET, "/api/v1/bloodpressure")).await;
        assert!(readings.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_not_found() {
        let app = create_test_app(no_extraction());

        let (status, body) = send_json(
            &app,
            json_request(Method::PUT, "/api/v1/bloodpressure/missing", json!({"sys": 135, "dia": 85, "ppm": 70})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Reading not found: missing");
        assert_eq!(body["details"]["id"], "missing");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_no_content() {
        let app = create_test_app(no_extraction());

        let (status, _) = send(&app, empty_request(Method::DELETE, "/api/v1/bloodpressure/missing")).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_extract_returns_reading_and_form_values() {
        let app = create_test_app(Ok(BloodPressureReading::from_values("118", "76", "68")));

        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure/extract", json!({"image_base64": long_image()})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reading"]["systolic"], "118");
        assert_eq!(body["form_values"], json!({"sys": 118, "dia": 76, "ppm": 68}));
    }

    #[tokio::test]
    async fn test_extract_partial_reading_has_no_form_values() {
        let reading = BloodPressureReading {
            pulse: None,
            ..BloodPressureReading::from_values("118", "76", "68")
        };
        let app = create_test_app(Ok(reading));

        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure/extract", json!({"image_base64": long_image()})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reading"]["pulse"], Value::Null);
        assert_eq!(body["form_values"], Value::Null);
    }

    #[tokio::test]
    async fn test_extract_rejects_short_image() {
        let app = create_test_app(Ok(BloodPressureReading::from_values("118", "76", "68")));

        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure/extract", json!({"image_base64": "abc"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid image data provided");
    }

    #[tokio::test]
    async fn test_extract_api_failure_is_bad_gateway() {
        let app = create_test_app(Err(ApiError::RequestFailed { status: Some(503) }));

        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure/extract", json!({"image_base64": long_image()})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_error");
        assert_eq!(body["message"], "API request failed with status 503.");
    }

    #[tokio::test]
    async fn test_report_is_html() {
        let app = create_test_app(no_extraction());
        send(
            &app,
            json_request(Method::POST, "/api/v1/bloodpressure", json!({"sys": 120, "dia": 80, "ppm": 75})),
        )
        .await;

        let response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/api/v1/bloodpressure/report"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Blood Pressure History"));
        assert!(html.contains("<td>120</td><td>80</td><td>75</td>"));
    }

    #[tokio::test]
    async fn test_openapi_json_is_served() {
        let app = create_test_app(no_extraction());

        let (status, doc) = send_json(&app, empty_request(Method::GET, "/api-docs/openapi.json")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["info"]["title"], "HealthTracker API");
    }
}

//! API module - HTTP handlers and routes

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::bridge::BridgeState;

pub fn routes() -> Router<BridgeState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/api/health", get(handlers::health_check))
        // Device snapshot
        .route("/api/device", get(handlers::get_device))
        .route("/api/device/refresh", post(handlers::refresh_device))
        // Fan
        .route("/api/fan", get(handlers::get_fan))
        .route("/api/fan/power", post(handlers::set_fan_power))
        .route("/api/fan/percentage", post(handlers::set_fan_percentage))
        .route("/api/fan/preset", post(handlers::set_fan_preset))
        // Lamp
        .route("/api/lamp", get(handlers::get_lamp))
        .route("/api/lamp", post(handlers::select_lamp))
        // Sensors
        .route("/api/sensors", get(handlers::list_sensors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollConfig;
    use crate::testing::FakeZinServer;
    use crate::zin::snapshot::tests::sample_payload;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app(server: &FakeZinServer) -> Router {
        let client = Arc::new(server.client());
        let state = BridgeState::new(client, PollConfig::default()).await;
        routes().with_state(state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let server = FakeZinServer::start(sample_payload()).await;
        let app = app(&server).await;
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_device_unavailable_until_refreshed() {
        let server = FakeZinServer::start(sample_payload()).await;
        let app = app(&server).await;

        let (status, body) = call(&app, "GET", "/api/device", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], 503);

        let (status, body) = call(&app, "POST", "/api/device/refresh", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["device_id"], "dev-1");

        let (status, body) = call(&app, "GET", "/api/device", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heat_exchanger"], 75);
        assert_eq!(body["info"]["manufacturer"], "LX Hausys");
    }

    #[tokio::test]
    async fn test_refresh_failure_is_bad_gateway() {
        let server = FakeZinServer::start(sample_payload()).await;
        server.state().fail_get = Some(500);
        let app = app(&server).await;

        let (status, _) = call(&app, "POST", "/api/device/refresh", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_fan_commands() {
        let server = FakeZinServer::start(sample_payload()).await;
        let app = app(&server).await;
        call(&app, "POST", "/api/device/refresh", None).await;

        let (status, body) =
            call(&app, "POST", "/api/fan/preset", Some(json!({ "preset": "SLEEP" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["preset_mode"], "SLEEP");

        let (status, body) =
            call(&app, "POST", "/api/fan/power", Some(json!({ "on": false }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_on"], false);
        assert_eq!(body["percentage"], 0);

        let (status, body) = call(&app, "GET", "/api/fan", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["speed_count"], 3);
        assert_eq!(body["preset_modes"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_fan_input_validation() {
        let server = FakeZinServer::start(sample_payload()).await;
        let app = app(&server).await;
        call(&app, "POST", "/api/device/refresh", None).await;

        let (status, _) =
            call(&app, "POST", "/api/fan/percentage", Some(json!({ "percentage": 150 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            call(&app, "POST", "/api/fan/preset", Some(json!({ "preset": "WARP" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            call(&app, "POST", "/api/fan/percentage", Some(json!({ "percentage": 100 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["speed"], 3);
        assert_eq!(body["percentage"], 100);
    }

    #[tokio::test]
    async fn test_lamp_and_sensors() {
        let server = FakeZinServer::start(sample_payload()).await;
        let app = app(&server).await;
        call(&app, "POST", "/api/device/refresh", None).await;

        let (status, body) = call(&app, "GET", "/api/lamp", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_option"], "display");

        let (status, _) = call(&app, "POST", "/api/lamp", Some(json!({ "style": "disco" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, "POST", "/api/lamp", Some(json!({ "style": "none" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_option"], "none");

        let (status, body) = call(&app, "GET", "/api/sensors", None).await;
        assert_eq!(status, StatusCode::OK);
        let readings = body.as_array().unwrap();
        assert_eq!(readings.len(), 8);
        let filter = readings.iter().find(|r| r["key"] == "filter").unwrap();
        assert_eq!(filter["unique_id"], "dev-1-filter");
        assert_eq!(filter["unit"], "%");
    }
}

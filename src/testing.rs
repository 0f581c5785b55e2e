//! In-process fake of the Z:in cloud service for tests

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::ApiConfig;
use crate::zin::ZinClient;

#[derive(Debug)]
pub(crate) struct FakeState {
    pub payload: Value,
    pub get_count: usize,
    pub desired_bodies: Vec<String>,
    pub auth_headers: Vec<String>,
    pub content_types: Vec<String>,
    pub fail_get: Option<u16>,
    pub fail_desired: Option<u16>,
    /// Served verbatim by the status endpoint instead of `payload`
    pub raw_get_body: Option<String>,
}

type Shared = Arc<Mutex<FakeState>>;

pub(crate) struct FakeZinServer {
    pub base_url: String,
    state: Shared,
}

impl FakeZinServer {
    pub async fn start(payload: Value) -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            payload,
            get_count: 0,
            desired_bodies: Vec::new(),
            auth_headers: Vec::new(),
            content_types: Vec::new(),
            fail_get: None,
            fail_desired: None,
            raw_get_body: None,
        }));

        let app = Router::new()
            .route("/service/api/v1/device/:id", get(status_handler))
            .route("/service/api/v1/device/:id/desired", post(desired_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/service/api/v1", addr),
            state,
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            settle_delay_ms: 0,
        }
    }

    /// Client for the device in the current payload
    pub fn client(&self) -> ZinClient {
        let (user_id, device_id) = {
            let state = self.state();
            (
                state.payload["ownerId"].as_str().unwrap_or_default().to_string(),
                state.payload["_id"].as_str().unwrap_or_default().to_string(),
            )
        };
        ZinClient::new(user_id, device_id, &self.api_config()).unwrap()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn get_count(&self) -> usize {
        self.state().get_count
    }
}

fn record_auth(state: &mut FakeState, headers: &HeaderMap) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    state.auth_headers.push(auth.to_string());
}

fn known_device(state: &FakeState, id: &str) -> bool {
    state.payload["_id"].as_str() == Some(id)
}

async fn status_handler(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    state.get_count += 1;
    record_auth(&mut state, &headers);

    if !known_device(&state, &id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(code) = state.fail_get {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "status unavailable").into_response();
    }
    if let Some(raw) = &state.raw_get_body {
        return ([(header::CONTENT_TYPE, "application/json")], raw.clone()).into_response();
    }
    Json(state.payload.clone()).into_response()
}

async fn desired_handler(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.content_types.push(content_type);
    state.desired_bodies.push(body.clone());

    if !known_device(&state, &id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(code) = state.fail_desired {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "desired rejected").into_response();
    }

    let patch: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    apply_patch(&mut state.payload["sensor"], &patch["sensor"]);

    // The device stops the fan when powered off
    if state.payload["sensor"]["power"]["status"] == "off" {
        state.payload["sensor"]["fan"]["fanSpeed"] = json!("0");
    }

    Json(json!({ "result": "ok" })).into_response()
}

fn apply_patch(target: &mut Value, patch: &Value) {
    if let (Some(fields), Some(patch_fields)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_fields {
            apply_patch(fields.entry(key.clone()).or_insert(Value::Null), value);
        }
        return;
    }
    *target = patch.clone();
}

//! Error handling module

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Faults raised by the Z:in device client and snapshot parser
#[derive(Error, Debug)]
pub enum ZinError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Z:in API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Payload decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid lastUpdatedAt timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("{component} lifeTime is zero")]
    ZeroLifeTime { component: &'static str },

    #[error("Unknown preset mode: {0}")]
    UnknownPreset(i64),

    #[error("Unknown preset name: {0}")]
    InvalidPresetName(String),

    #[error("Unknown lamp style: {0}")]
    InvalidLampStyle(String),

    #[error("Fan speed out of range (1-3): {0}")]
    InvalidFanSpeed(u8),

    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Reasons the device setup flow aborts
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Device {0} is already configured")]
    AlreadyConfigured(String),

    #[error("Cannot reach device: {0}")]
    Device(#[from] ZinError),
}

/// Errors returned by the local HTTP API
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream error: {0}")]
    Upstream(ZinError),
}

impl From<ZinError> for AppError {
    fn from(err: ZinError) -> Self {
        match err {
            ZinError::InvalidPresetName(_)
            | ZinError::InvalidLampStyle(_)
            | ZinError::InvalidFanSpeed(_) => AppError::BadRequest(err.to_string()),
            other => AppError::Upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

//! Device snapshot and sensor handlers

use axum::{extract::State, response::IntoResponse, Json};

use crate::bridge::BridgeState;
use crate::entity::sensor::SensorReading;
use crate::error::AppError;

/// GET /api/device - Latest snapshot held by the client
pub async fn get_device(State(state): State<BridgeState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = state
        .client
        .snapshot()
        .await
        .ok_or_else(|| AppError::ServiceUnavailable("Device state not fetched yet".to_string()))?;

    Ok(Json(snapshot.as_ref().clone()))
}

/// POST /api/device/refresh - Fetch now, bypassing the poll interval
pub async fn refresh_device(
    State(state): State<BridgeState>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.client.update().await?;
    state.sync_entities().await;

    Ok(Json(snapshot.as_ref().clone()))
}

/// GET /api/sensors - All sensor readings
pub async fn list_sensors(State(state): State<BridgeState>) -> impl IntoResponse {
    let readings: Vec<SensorReading> = state
        .sensors
        .lock()
        .await
        .iter()
        .map(|s| s.reading())
        .collect();

    Json(readings)
}

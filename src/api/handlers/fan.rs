//! Fan handlers

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::bridge::BridgeState;
use crate::entity::ZinFan;
use crate::error::AppError;
use crate::zin::Preset;

#[derive(Debug, Serialize)]
pub struct FanView {
    pub unique_id: String,
    pub name: Option<String>,
    pub is_on: bool,
    pub speed: i64,
    pub speed_name: Option<&'static str>,
    pub percentage: u8,
    pub speed_count: u8,
    pub preset_mode: Option<Preset>,
    pub preset_modes: Vec<Preset>,
}

impl FanView {
    fn from_entity(fan: &ZinFan) -> Result<Self, AppError> {
        Ok(Self {
            unique_id: fan.unique_id().to_string(),
            name: fan.name().map(str::to_string),
            is_on: fan.is_on(),
            speed: fan.speed(),
            speed_name: fan.speed_name(),
            percentage: fan.percentage(),
            speed_count: fan.speed_count(),
            preset_mode: fan.preset_mode()?,
            preset_modes: fan.preset_modes().to_vec(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PowerRequest {
    pub on: bool,
}

#[derive(Debug, Deserialize)]
pub struct PercentageRequest {
    pub percentage: u8,
}

#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    pub preset: String,
}

/// GET /api/fan - Fan entity view
pub async fn get_fan(State(state): State<BridgeState>) -> Result<impl IntoResponse, AppError> {
    let fan = state.fan.lock().await;
    Ok(Json(FanView::from_entity(&fan)?))
}

/// POST /api/fan/power - Turn the fan on or off
pub async fn set_fan_power(
    State(state): State<BridgeState>,
    Json(payload): Json<PowerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = {
        let mut fan = state.fan.lock().await;
        if payload.on {
            fan.turn_on().await?;
        } else {
            fan.turn_off().await?;
        }
        FanView::from_entity(&fan)?
    };
    state.sync_entities().await;

    Ok(Json(view))
}

/// POST /api/fan/percentage - Set speed as a percentage (0 turns off)
pub async fn set_fan_percentage(
    State(state): State<BridgeState>,
    Json(payload): Json<PercentageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.percentage > 100 {
        return Err(AppError::BadRequest(format!(
            "percentage must be 0-100, got {}",
            payload.percentage
        )));
    }

    let view = {
        let mut fan = state.fan.lock().await;
        fan.set_percentage(payload.percentage).await?;
        FanView::from_entity(&fan)?
    };
    state.sync_entities().await;

    Ok(Json(view))
}

/// POST /api/fan/preset - Set preset mode by name
pub async fn set_fan_preset(
    State(state): State<BridgeState>,
    Json(payload): Json<PresetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = {
        let mut fan = state.fan.lock().await;
        fan.set_preset_mode(&payload.preset).await?;
        FanView::from_entity(&fan)?
    };
    state.sync_entities().await;

    Ok(Json(view))
}

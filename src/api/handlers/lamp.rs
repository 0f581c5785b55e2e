//! Lamp select handlers

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::bridge::BridgeState;
use crate::entity::ZinLamp;
use crate::error::AppError;
use crate::zin::LampStyle;

#[derive(Debug, Serialize)]
pub struct LampView {
    pub unique_id: String,
    pub name: Option<String>,
    pub icon: &'static str,
    pub current_option: Option<String>,
    pub options: Vec<LampStyle>,
}

impl LampView {
    fn from_entity(lamp: &ZinLamp) -> Self {
        Self {
            unique_id: lamp.unique_id(),
            name: lamp.name(),
            icon: lamp.icon(),
            current_option: lamp.current_option().map(str::to_string),
            options: lamp.options().to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectLampRequest {
    pub style: String,
}

/// GET /api/lamp - Lamp select view
pub async fn get_lamp(State(state): State<BridgeState>) -> impl IntoResponse {
    let lamp = state.lamp.lock().await;
    Json(LampView::from_entity(&lamp))
}

/// POST /api/lamp - Select a lamp style
pub async fn select_lamp(
    State(state): State<BridgeState>,
    Json(payload): Json<SelectLampRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.lamp.lock().await.select_option(&payload.style).await?;
    state.sync_entities().await;

    let lamp = state.lamp.lock().await;
    Ok(Json(LampView::from_entity(&lamp)))
}

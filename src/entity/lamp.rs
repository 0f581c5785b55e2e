//! Lamp style select entity

use std::sync::Arc;

use crate::error::ZinError;
use crate::zin::{DeviceSnapshot, LampStyle, ZinClient};

pub struct ZinLamp {
    client: Arc<ZinClient>,
    info: Option<Arc<DeviceSnapshot>>,
}

impl ZinLamp {
    pub async fn new(client: Arc<ZinClient>) -> Self {
        let info = client.snapshot().await;
        Self { client, info }
    }

    pub fn unique_id(&self) -> String {
        format!("{}-lamp", self.client.device_id())
    }

    pub fn name(&self) -> Option<String> {
        self.info.as_ref().map(|i| format!("{} Lamp", i.name))
    }

    pub fn icon(&self) -> &'static str {
        "mdi:television-ambient-light"
    }

    /// Raw style reported by the device
    pub fn current_option(&self) -> Option<&str> {
        self.info.as_deref().map(|i| i.lamp.as_str())
    }

    pub fn options(&self) -> &'static [LampStyle] {
        &LampStyle::ALL
    }

    pub async fn select_option(&mut self, option: &str) -> Result<(), ZinError> {
        let style: LampStyle = option.parse()?;
        self.info = Some(self.client.set_lamp_style(style).await?);
        Ok(())
    }

    pub async fn update(&mut self) {
        self.info = self.client.snapshot().await;
    }
}

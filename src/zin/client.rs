//! Z:in cloud API client

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tokio::sync::RwLock;
use tokio::time;

use super::command::DesiredCommand;
use super::preset::{LampStyle, Preset};
use super::snapshot::DeviceSnapshot;
use super::token::mint_token;
use crate::config::ApiConfig;
use crate::error::ZinError;

/// Client for a single Z:in device.
///
/// Holds the latest parsed snapshot. Every successful fetch swaps in a new
/// `Arc<DeviceSnapshot>`; a failed fetch leaves the previous one in place.
pub struct ZinClient {
    user_id: String,
    device_id: String,
    base_url: String,
    settle_delay: Duration,
    http_client: Client,
    snapshot: RwLock<Option<Arc<DeviceSnapshot>>>,
}

impl ZinClient {
    pub fn new(
        user_id: impl Into<String>,
        device_id: impl Into<String>,
        api: &ApiConfig,
    ) -> Result<Self, ZinError> {
        // One connection per call, nothing kept idle between polls
        let http_client = Client::builder()
            .timeout(api.timeout())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            user_id: user_id.into(),
            device_id: device_id.into(),
            base_url: api.base_url.trim_end_matches('/').to_string(),
            settle_delay: api.settle_delay(),
            http_client,
            snapshot: RwLock::new(None),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Latest successfully fetched snapshot, if any
    pub async fn snapshot(&self) -> Option<Arc<DeviceSnapshot>> {
        self.snapshot.read().await.clone()
    }

    fn status_url(&self) -> String {
        format!("{}/device/{}", self.base_url, self.device_id)
    }

    fn desired_url(&self) -> String {
        format!("{}/device/{}/desired", self.base_url, self.device_id)
    }

    /// Fetch the device state and replace the held snapshot.
    pub async fn update(&self) -> Result<Arc<DeviceSnapshot>, ZinError> {
        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                {
                    let mut current = self.snapshot.write().await;
                    *current = Some(Arc::clone(&snapshot));
                }
                tracing::info!("[Zin] Device info <-- {}", snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(
                    "[Zin] Failed to update device {} status: {}",
                    self.device_id,
                    e
                );
                Err(e)
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<DeviceSnapshot, ZinError> {
        let token = mint_token(&self.user_id)?;

        let resp = self
            .http_client
            .get(self.status_url())
            .bearer_auth(token)
            .send()
            .await?;

        let body = read_success_body(resp).await?;
        DeviceSnapshot::from_json(&body)
    }

    /// Send one desired-state patch, wait for the device to settle, then refresh.
    ///
    /// The patch has already been applied server-side when the follow-up
    /// refresh fails; that refresh error is still returned.
    pub async fn desired(&self, command: DesiredCommand) -> Result<Arc<DeviceSnapshot>, ZinError> {
        if let Err(e) = self.post_desired(command).await {
            tracing::error!(
                "[Zin] Failed to send {:?} to device {}: {}",
                command,
                self.device_id,
                e
            );
            return Err(e);
        }

        time::sleep(self.settle_delay).await;
        self.update().await
    }

    async fn post_desired(&self, command: DesiredCommand) -> Result<(), ZinError> {
        let body = command.to_json()?;
        let token = mint_token(&self.user_id)?;

        tracing::info!("[Zin] Desired --> {}", body);

        let resp = self
            .http_client
            .post(self.desired_url())
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let text = read_success_body(resp).await?;
        tracing::info!("[Zin] Desired <-- {}", text);
        Ok(())
    }

    pub async fn set_power(&self, on: bool) -> Result<Arc<DeviceSnapshot>, ZinError> {
        self.desired(DesiredCommand::Power(on)).await
    }

    pub async fn set_preset(&self, preset: Preset) -> Result<Arc<DeviceSnapshot>, ZinError> {
        self.desired(DesiredCommand::Preset(preset)).await
    }

    pub async fn set_fan_speed(&self, speed: u8) -> Result<Arc<DeviceSnapshot>, ZinError> {
        self.desired(DesiredCommand::fan_speed(speed)?).await
    }

    pub async fn set_lamp_style(&self, style: LampStyle) -> Result<Arc<DeviceSnapshot>, ZinError> {
        self.desired(DesiredCommand::Lamp(style)).await
    }
}

async fn read_success_body(resp: Response) -> Result<String, ZinError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ZinError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

//! Device setup flow
//!
//! Collects the owner id and device id, refuses a device that is already
//! configured, and checks the pair against the cloud by fetching the device
//! state once. The fetched device name becomes the entry title.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::SetupError;
use crate::zin::ZinClient;

#[derive(Debug, Clone, Deserialize)]
pub struct SetupInput {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub title: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
}

/// A completed setup: the entry plus the client that validated it
pub struct SetupOutcome {
    pub entry: ConfigEntry,
    pub client: Arc<ZinClient>,
}

pub struct SetupFlow {
    api: ApiConfig,
    configured: HashSet<String>,
}

impl SetupFlow {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            configured: HashSet::new(),
        }
    }

    pub fn with_configured<I>(api: ApiConfig, device_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            api,
            configured: device_ids.into_iter().collect(),
        }
    }

    pub fn is_configured(&self, device_id: &str) -> bool {
        self.configured.contains(device_id)
    }

    pub async fn submit(&mut self, input: SetupInput) -> Result<SetupOutcome, SetupError> {
        let user_id = input.user_id.trim();
        let device_id = input.device_id.trim();
        if user_id.is_empty() {
            return Err(SetupError::MissingField("userId"));
        }
        if device_id.is_empty() {
            return Err(SetupError::MissingField("deviceId"));
        }
        if self.is_configured(device_id) {
            tracing::warn!("[Setup] Device {} already configured", device_id);
            return Err(SetupError::AlreadyConfigured(device_id.to_string()));
        }

        let client = Arc::new(ZinClient::new(user_id, device_id, &self.api)?);
        let snapshot = client.update().await?;

        self.configured.insert(device_id.to_string());
        tracing::info!("[Setup] Configured device {} ({})", snapshot.name, device_id);

        Ok(SetupOutcome {
            entry: ConfigEntry {
                title: snapshot.name.clone(),
                user_id: user_id.to_string(),
                device_id: device_id.to_string(),
            },
            client,
        })
    }
}

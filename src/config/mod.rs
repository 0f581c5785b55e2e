//! Configuration module

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub device: DeviceConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Identity of the single device this bridge controls
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub user_id: String,
    pub device_id: String,
}

/// Vendor API endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Caller-side refresh throttle
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Used instead of `interval_secs` while the device reports power off
    #[serde(default = "default_off_interval_secs")]
    pub off_interval_secs: u64,
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            off_interval_secs: default_off_interval_secs(),
            tick_secs: default_tick_secs(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self, powered_on: bool) -> Duration {
        if powered_on {
            Duration::from_secs(self.interval_secs)
        } else {
            Duration::from_secs(self.off_interval_secs)
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs.max(1))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8092
}

fn default_base_url() -> String {
    "https://iot-service.lxhausys.com/service/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_interval_secs() -> u64 {
    90
}

fn default_off_interval_secs() -> u64 {
    180
}

fn default_tick_secs() -> u64 {
    10
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("ZINFAN").separator("__"))
            .build()?;

        let config: Config = settings
            .try_deserialize()
            .context("device.user_id and device.device_id must be configured")?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let base = url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", self.api.base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("api.base_url must be http(s): {}", self.api.base_url);
        }
        if self.device.user_id.trim().is_empty() || self.device.device_id.trim().is_empty() {
            anyhow::bail!("device.user_id and device.device_id must not be empty");
        }
        Ok(())
    }
}

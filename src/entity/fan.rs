//! Fan entity: power, speed percentage and preset mode

use std::sync::Arc;
use std::time::Instant;

use super::percentage::SpeedRange;
use crate::config::PollConfig;
use crate::error::ZinError;
use crate::zin::{DeviceInfo, DeviceSnapshot, Preset, ZinClient};

pub const SPEED_RANGE: SpeedRange = SpeedRange::new(1, 3);

pub const NAMED_SPEEDS: [&str; 3] = ["low", "mid", "high"];

pub struct ZinFan {
    client: Arc<ZinClient>,
    poll: PollConfig,
    info: Option<Arc<DeviceSnapshot>>,
    last_checked: Option<Instant>,
}

impl ZinFan {
    pub async fn new(client: Arc<ZinClient>, poll: PollConfig) -> Self {
        let info = client.snapshot().await;
        Self {
            client,
            poll,
            info,
            last_checked: None,
        }
    }

    pub fn unique_id(&self) -> &str {
        self.client.device_id()
    }

    pub fn name(&self) -> Option<&str> {
        self.info.as_deref().map(|i| i.name.as_str())
    }

    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.info.as_deref().map(|i| &i.info)
    }

    pub fn is_on(&self) -> bool {
        self.info.as_ref().map_or(false, |i| i.power)
    }

    pub fn speed(&self) -> i64 {
        self.info.as_ref().map_or(0, |i| i.fan_speed)
    }

    pub fn percentage(&self) -> u8 {
        match self.speed() {
            speed if speed <= 0 => 0,
            speed => SPEED_RANGE.value_to_percentage(speed.min(i64::from(SPEED_RANGE.high)) as u8),
        }
    }

    pub fn speed_name(&self) -> Option<&'static str> {
        match self.speed() {
            speed @ 1..=3 => Some(NAMED_SPEEDS[(speed - 1) as usize]),
            _ => None,
        }
    }

    pub fn speed_count(&self) -> u8 {
        SPEED_RANGE.states()
    }

    /// `None` without a snapshot or when no preset is active
    pub fn preset_mode(&self) -> Result<Option<Preset>, ZinError> {
        match &self.info {
            Some(info) => info.preset(),
            None => Ok(None),
        }
    }

    pub fn preset_modes(&self) -> &'static [Preset] {
        &Preset::ALL
    }

    fn store(&mut self, snapshot: Arc<DeviceSnapshot>) {
        self.info = Some(snapshot);
    }

    pub async fn turn_on(&mut self) -> Result<(), ZinError> {
        let snapshot = self.client.set_power(true).await?;
        self.store(snapshot);
        Ok(())
    }

    pub async fn turn_off(&mut self) -> Result<(), ZinError> {
        let snapshot = self.client.set_power(false).await?;
        self.store(snapshot);
        Ok(())
    }

    pub async fn set_preset_mode(&mut self, preset_mode: &str) -> Result<(), ZinError> {
        let preset: Preset = preset_mode.parse()?;
        tracing::info!("[ZinFan] Setting preset mode to {}", preset);
        let snapshot = self.client.set_preset(preset).await?;
        self.store(snapshot);
        Ok(())
    }

    /// 0 turns the fan off. Otherwise the fan is powered on if needed, and the
    /// speed is only changed while the FAN preset is active.
    pub async fn set_percentage(&mut self, percentage: u8) -> Result<(), ZinError> {
        let Some(mut current) = self.info.clone() else {
            return Ok(());
        };

        if percentage == 0 {
            let snapshot = self.client.set_power(false).await?;
            self.store(snapshot);
            return Ok(());
        }

        if !current.power {
            current = self.client.set_power(true).await?;
            self.store(Arc::clone(&current));
        }

        if current.preset()? == Some(Preset::Fan) {
            let speed = SPEED_RANGE.percentage_to_speed(percentage.min(100));
            let snapshot = self.client.set_fan_speed(speed).await?;
            self.store(snapshot);
        }

        Ok(())
    }

    /// Pick up the client's snapshot without fetching
    pub async fn sync(&mut self) {
        self.info = self.client.snapshot().await;
    }

    pub async fn update(&mut self) -> Result<(), ZinError> {
        self.update_at(Instant::now()).await
    }

    /// Refresh through the client only once the poll interval has passed,
    /// then pick up whatever snapshot the client holds.
    pub async fn update_at(&mut self, now: Instant) -> Result<(), ZinError> {
        let powered_on = self.info.as_ref().map_or(true, |i| i.power);
        let interval = self.poll.interval(powered_on);
        let due = self
            .last_checked
            .map_or(true, |last| now.saturating_duration_since(last) > interval);

        if due {
            self.client.update().await?;
            self.last_checked = Some(now);
        }

        self.sync().await;
        Ok(())
    }
}

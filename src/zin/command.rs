//! Desired-state command bodies
//!
//! Each command serializes to a single-attribute patch under `sensor`:
//! - `{"sensor":{"power":{"status":"on"}}}`
//! - `{"sensor":{"mode":"5"}}`
//! - `{"sensor":{"fan":{"fanSpeed":"2"}}}`
//! - `{"sensor":{"lamp":{"style":"display"}}}`

use serde::Serialize;

use super::preset::{LampStyle, Preset};
use crate::error::ZinError;

/// One partial update for the `/desired` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredCommand {
    Power(bool),
    Preset(Preset),
    FanSpeed(u8),
    Lamp(LampStyle),
}

#[derive(Debug, Serialize)]
struct DesiredBody {
    sensor: SensorPatch,
}

#[derive(Debug, Default, Serialize)]
struct SensorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    power: Option<PowerPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fan: Option<FanPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lamp: Option<LampPatch>,
}

#[derive(Debug, Serialize)]
struct PowerPatch {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct FanPatch {
    #[serde(rename = "fanSpeed")]
    fan_speed: String,
}

#[derive(Debug, Serialize)]
struct LampPatch {
    style: LampStyle,
}

impl DesiredCommand {
    pub const MIN_FAN_SPEED: u8 = 1;
    pub const MAX_FAN_SPEED: u8 = 3;

    /// Fan speed command, rejecting speeds the device does not have
    pub fn fan_speed(speed: u8) -> Result<Self, ZinError> {
        if (Self::MIN_FAN_SPEED..=Self::MAX_FAN_SPEED).contains(&speed) {
            Ok(DesiredCommand::FanSpeed(speed))
        } else {
            Err(ZinError::InvalidFanSpeed(speed))
        }
    }

    fn body(&self) -> DesiredBody {
        let mut sensor = SensorPatch::default();
        match *self {
            DesiredCommand::Power(on) => {
                sensor.power = Some(PowerPatch {
                    status: if on { "on" } else { "off" },
                });
            }
            DesiredCommand::Preset(preset) => sensor.mode = Some(preset.code().to_string()),
            DesiredCommand::FanSpeed(speed) => {
                sensor.fan = Some(FanPatch {
                    fan_speed: speed.to_string(),
                });
            }
            DesiredCommand::Lamp(style) => sensor.lamp = Some(LampPatch { style }),
        }
        DesiredBody { sensor }
    }

    pub fn to_json(&self) -> Result<String, ZinError> {
        Ok(serde_json::to_string(&self.body())?)
    }
}

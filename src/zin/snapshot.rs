//! Device snapshot parsed from one status payload

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::preset::Preset;
use super::wire::StatusPayload;
use crate::error::ZinError;

/// Static device identity reported alongside the sensor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub manufacturer: String,
    pub serial_number: String,
    pub model: String,
    /// Modem firmware version
    pub sw_version: String,
    /// MCU firmware version
    pub hw_version: String,
}

/// Point-in-time device state. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSnapshot {
    pub user_id: String,
    pub device_id: String,
    pub name: String,
    pub info: DeviceInfo,

    pub co2: i64,
    pub pm25: i64,
    pub tvoc: i64,
    pub temperature: i64,
    pub humidity: i64,

    pub power: bool,
    /// 1-3, 0 when off or unknown
    pub fan_speed: i64,
    /// Raw preset code, 0 when no preset is active
    pub mode: i64,
    pub lamp: String,

    /// Remaining heat exchanger life, percent
    pub heat_exchanger: i64,
    /// Remaining filter life, percent
    pub filter: i64,

    pub last_updated: DateTime<Utc>,
}

impl DeviceSnapshot {
    pub fn from_json(body: &str) -> Result<Self, ZinError> {
        let payload: StatusPayload = serde_json::from_str(body)?;
        Self::from_wire(payload)
    }

    pub fn from_payload(value: &serde_json::Value) -> Result<Self, ZinError> {
        let payload = StatusPayload::deserialize(value)?;
        Self::from_wire(payload)
    }

    fn from_wire(payload: StatusPayload) -> Result<Self, ZinError> {
        let sensor = payload.sensor;
        let device = payload.device;
        let air = sensor.air_condition;

        let heat_exchanger = life_percentage(
            "heatExchanger",
            sensor.heat_exchanger.life_time,
            sensor.heat_exchanger.usage_time,
        )?;
        let filter = life_percentage(
            "filter",
            sensor.filter.filter_life_time,
            sensor.filter.filter_usage_time,
        )?;

        Ok(Self {
            user_id: payload.owner_id,
            device_id: payload.id,
            name: device.name,
            info: DeviceInfo {
                manufacturer: device.manufacturer,
                serial_number: device.serial_no,
                model: device.device_type,
                sw_version: device.firmware.modem.version,
                hw_version: device.firmware.mcu.version,
            },
            co2: air.co2,
            pm25: air.pm2_5,
            tvoc: air.tvocs,
            temperature: air.temperature,
            humidity: air.humidity,
            power: sensor.power.status == "on",
            fan_speed: sensor.fan.fan_speed,
            mode: sensor.mode,
            lamp: sensor.lamp.style,
            heat_exchanger,
            filter,
            last_updated: parse_timestamp(&payload.last_updated_at)?,
        })
    }

    /// Active preset, `None` for mode 0. Unknown codes are an error.
    pub fn preset(&self) -> Result<Option<Preset>, ZinError> {
        Preset::from_mode(self.mode)
    }
}

impl fmt::Display for DeviceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {}, power: {}, fanSpeed: {}, mode: {}, temp: {}, humi: {}",
            self.name, self.power, self.fan_speed, self.mode, self.temperature, self.humidity
        )
    }
}

/// `round((life - usage) / life * 100)`, computed in floating point so
/// out-of-range counters cannot overflow.
pub fn life_percentage(component: &'static str, life: i64, usage: i64) -> Result<i64, ZinError> {
    if life == 0 {
        return Err(ZinError::ZeroLifeTime { component });
    }
    let (life, usage) = (life as f64, usage as f64);
    Ok(((life - usage) / life * 100.0).round() as i64)
}

/// RFC 3339, or a bare ISO-8601 local time taken as UTC
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ZinError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| ZinError::InvalidTimestamp(raw.to_string()))
}

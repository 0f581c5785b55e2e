//! Read-only sensor entities backed by the client snapshot

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::zin::{DeviceSnapshot, ZinClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKey {
    Tvoc,
    Temperature,
    Humidity,
    Co2,
    Pm25,
    HeatExchanger,
    Filter,
    LastUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorDeviceClass {
    Aqi,
    Temperature,
    Humidity,
    CarbonDioxide,
    Pm25,
    Battery,
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl SensorKey {
    pub const ALL: [SensorKey; 8] = [
        SensorKey::Tvoc,
        SensorKey::Temperature,
        SensorKey::Humidity,
        SensorKey::Co2,
        SensorKey::Pm25,
        SensorKey::HeatExchanger,
        SensorKey::Filter,
        SensorKey::LastUpdated,
    ];

    pub fn id_suffix(&self) -> &'static str {
        match self {
            SensorKey::Tvoc => "tvoc",
            SensorKey::Temperature => "temp",
            SensorKey::Humidity => "humi",
            SensorKey::Co2 => "co2",
            SensorKey::Pm25 => "pm25",
            SensorKey::HeatExchanger => "heatlife",
            SensorKey::Filter => "filter",
            SensorKey::LastUpdated => "updated",
        }
    }

    pub fn name_suffix(&self) -> &'static str {
        match self {
            SensorKey::Tvoc => "TVOCs",
            SensorKey::Temperature => "Temperature",
            SensorKey::Humidity => "Humidity",
            SensorKey::Co2 => "CO2",
            SensorKey::Pm25 => "PM2.5",
            SensorKey::HeatExchanger => "Heat exchanger",
            SensorKey::Filter => "Filter",
            SensorKey::LastUpdated => "Last updated",
        }
    }

    pub fn device_class(&self) -> SensorDeviceClass {
        match self {
            SensorKey::Tvoc => SensorDeviceClass::Aqi,
            SensorKey::Temperature => SensorDeviceClass::Temperature,
            SensorKey::Humidity => SensorDeviceClass::Humidity,
            SensorKey::Co2 => SensorDeviceClass::CarbonDioxide,
            SensorKey::Pm25 => SensorDeviceClass::Pm25,
            SensorKey::HeatExchanger | SensorKey::Filter => SensorDeviceClass::Battery,
            SensorKey::LastUpdated => SensorDeviceClass::Timestamp,
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            SensorKey::Temperature => Some("°C"),
            SensorKey::Humidity | SensorKey::HeatExchanger | SensorKey::Filter => Some("%"),
            SensorKey::Co2 => Some("ppm"),
            SensorKey::Pm25 => Some("µg/m³"),
            SensorKey::Tvoc | SensorKey::LastUpdated => None,
        }
    }

    pub fn state_class(&self) -> Option<&'static str> {
        match self {
            SensorKey::LastUpdated => None,
            _ => Some("measurement"),
        }
    }

    pub fn value(&self, snapshot: &DeviceSnapshot) -> SensorValue {
        match self {
            SensorKey::Tvoc => SensorValue::Integer(snapshot.tvoc),
            SensorKey::Temperature => SensorValue::Integer(snapshot.temperature),
            SensorKey::Humidity => SensorValue::Integer(snapshot.humidity),
            SensorKey::Co2 => SensorValue::Integer(snapshot.co2),
            SensorKey::Pm25 => SensorValue::Integer(snapshot.pm25),
            SensorKey::HeatExchanger => SensorValue::Integer(snapshot.heat_exchanger),
            SensorKey::Filter => SensorValue::Integer(snapshot.filter),
            SensorKey::LastUpdated => SensorValue::Timestamp(snapshot.last_updated),
        }
    }
}

/// One sensor reading as exposed to the host
#[derive(Debug, Clone, Serialize)]
pub struct SensorReading {
    pub unique_id: String,
    pub key: SensorKey,
    pub name: Option<String>,
    pub device_class: SensorDeviceClass,
    pub unit: Option<&'static str>,
    pub state_class: Option<&'static str>,
    pub value: Option<SensorValue>,
}

pub struct ZinSensor {
    key: SensorKey,
    client: Arc<ZinClient>,
    info: Option<Arc<DeviceSnapshot>>,
}

impl ZinSensor {
    pub async fn new(key: SensorKey, client: Arc<ZinClient>) -> Self {
        let info = client.snapshot().await;
        Self { key, client, info }
    }

    /// One entity per `SensorKey`
    pub async fn all(client: &Arc<ZinClient>) -> Vec<ZinSensor> {
        let mut sensors = Vec::with_capacity(SensorKey::ALL.len());
        for key in SensorKey::ALL {
            sensors.push(ZinSensor::new(key, Arc::clone(client)).await);
        }
        sensors
    }

    pub fn key(&self) -> SensorKey {
        self.key
    }

    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.client.device_id(), self.key.id_suffix())
    }

    pub fn name(&self) -> Option<String> {
        self.info
            .as_ref()
            .map(|i| format!("{} {}", i.name, self.key.name_suffix()))
    }

    pub fn native_value(&self) -> Option<SensorValue> {
        self.info.as_deref().map(|i| self.key.value(i))
    }

    /// Sensors never fetch; they pick up the client's latest snapshot.
    pub async fn update(&mut self) {
        self.info = self.client.snapshot().await;
    }

    pub fn reading(&self) -> SensorReading {
        SensorReading {
            unique_id: self.unique_id(),
            key: self.key,
            name: self.name(),
            device_class: self.key.device_class(),
            unit: self.key.unit(),
            state_class: self.key.state_class(),
            value: self.native_value(),
        }
    }
}

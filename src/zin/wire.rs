// Wire types for the status endpoint. Numeric fields come back from the API
// either as JSON numbers or as numeric strings depending on firmware.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub(super) struct StatusPayload {
    #[serde(rename = "ownerId", deserialize_with = "lenient_string")]
    pub owner_id: String,
    #[serde(rename = "_id", deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "lastUpdatedAt")]
    pub last_updated_at: String,
    pub device: DevicePayload,
    pub sensor: SensorPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct DevicePayload {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub manufacturer: String,
    #[serde(rename = "serialNo", deserialize_with = "lenient_string")]
    pub serial_no: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub device_type: String,
    pub firmware: FirmwarePayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct FirmwarePayload {
    pub modem: VersionPayload,
    pub mcu: VersionPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct VersionPayload {
    #[serde(deserialize_with = "lenient_string")]
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SensorPayload {
    #[serde(rename = "airCondition")]
    pub air_condition: AirConditionPayload,
    pub fan: FanPayload,
    #[serde(deserialize_with = "lenient_i64")]
    pub mode: i64,
    pub lamp: LampPayload,
    pub power: PowerPayload,
    #[serde(rename = "heatExchanger")]
    pub heat_exchanger: HeatExchangerPayload,
    pub filter: FilterPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct AirConditionPayload {
    #[serde(deserialize_with = "lenient_i64")]
    pub co2: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub pm2_5: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub tvocs: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub temperature: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub humidity: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct FanPayload {
    #[serde(rename = "fanSpeed", deserialize_with = "lenient_i64")]
    pub fan_speed: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct LampPayload {
    #[serde(deserialize_with = "lenient_string")]
    pub style: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PowerPayload {
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct HeatExchangerPayload {
    #[serde(rename = "lifeTime", deserialize_with = "lenient_i64")]
    pub life_time: i64,
    #[serde(rename = "usageTime", deserialize_with = "lenient_i64")]
    pub usage_time: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct FilterPayload {
    #[serde(rename = "filterLifeTime", deserialize_with = "lenient_i64")]
    pub filter_life_time: i64,
    #[serde(rename = "filterUsageTime", deserialize_with = "lenient_i64")]
    pub filter_usage_time: i64,
}

/// Accepts an integer, a float (truncated toward zero) or a numeric string.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberFormat {
        Int(i64),
        Float(f64),
        String(String),
    }

    fn truncate<E: serde::de::Error>(f: f64) -> Result<i64, E> {
        if f.is_finite() {
            Ok(f.trunc() as i64)
        } else {
            Err(E::custom(format!("non-finite number: {}", f)))
        }
    }

    match NumberFormat::deserialize(deserializer)? {
        NumberFormat::Int(v) => Ok(v),
        NumberFormat::Float(f) => truncate(f),
        NumberFormat::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(v) => Ok(v),
                Err(_) => s
                    .parse::<f64>()
                    .map_err(|_| {
                        <D::Error as serde::de::Error>::custom(format!("not a number: {:?}", s))
                    })
                    .and_then(truncate::<D::Error>),
            }
        }
    }
}

/// Accepts a string or a number, yielding its string form.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringFormat {
        String(String),
        Number(serde_json::Number),
    }

    match StringFormat::deserialize(deserializer)? {
        StringFormat::String(s) => Ok(s),
        StringFormat::Number(n) => Ok(n.to_string()),
    }
}

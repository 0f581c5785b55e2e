//! Entities exposed to the host: fan, lamp select and sensors
//!
//! Entities hold an `Arc<ZinClient>` and read its latest snapshot. Only the
//! fan entity triggers refreshes, throttled by `PollConfig`.

pub mod fan;
pub mod lamp;
pub mod percentage;
pub mod sensor;

pub use fan::ZinFan;
pub use lamp::ZinLamp;
pub use sensor::{SensorKey, SensorValue, ZinSensor};

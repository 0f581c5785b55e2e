//! LX Z:in cloud API integration module
//!
//! - `client`: device client (token minting, status fetch, desired-state commands)
//! - `snapshot`: typed parse of the status payload
//! - `command`: desired-state command bodies
//! - `preset`: preset modes and lamp styles

pub mod client;
pub mod command;
pub mod preset;
pub mod snapshot;
pub mod token;
mod wire;

pub use client::ZinClient;
pub use command::DesiredCommand;
pub use preset::{LampStyle, Preset};
pub use snapshot::{DeviceInfo, DeviceSnapshot};

//! zin-fan-bridge - LX Z:in ventilation fan bridge
//!
//! Talks to the Z:in cloud service for a single device, keeps the latest
//! device snapshot, and exposes it as fan, lamp and sensor entities.

pub mod api;
pub mod bridge;
pub mod config;
pub mod entity;
pub mod error;
pub mod poll;
pub mod setup;
pub mod zin;

#[cfg(test)]
pub(crate) mod testing;

//! Preset modes and lamp styles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZinError;

/// Fan operating mode, sent as a small integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Preset {
    ForceOut,
    Auto,
    Turbo,
    Sleep,
    Fan,
    ForceIn,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::ForceOut,
        Preset::Auto,
        Preset::Turbo,
        Preset::Sleep,
        Preset::Fan,
        Preset::ForceIn,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Preset::ForceOut => 1,
            Preset::Auto => 2,
            Preset::Turbo => 3,
            Preset::Sleep => 4,
            Preset::Fan => 5,
            Preset::ForceIn => 6,
        }
    }

    /// Interpret a raw mode code. 0 means no active preset.
    pub fn from_mode(mode: i64) -> Result<Option<Self>, ZinError> {
        match mode {
            0 => Ok(None),
            1 => Ok(Some(Preset::ForceOut)),
            2 => Ok(Some(Preset::Auto)),
            3 => Ok(Some(Preset::Turbo)),
            4 => Ok(Some(Preset::Sleep)),
            5 => Ok(Some(Preset::Fan)),
            6 => Ok(Some(Preset::ForceIn)),
            other => Err(ZinError::UnknownPreset(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::ForceOut => "FORCE_OUT",
            Preset::Auto => "AUTO",
            Preset::Turbo => "TURBO",
            Preset::Sleep => "SLEEP",
            Preset::Fan => "FAN",
            Preset::ForceIn => "FORCE_IN",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ZinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ZinError::InvalidPresetName(s.to_string()))
    }
}

/// Ambient lamp setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LampStyle {
    All,
    Display,
    None,
}

impl LampStyle {
    pub const ALL: [LampStyle; 3] = [LampStyle::All, LampStyle::Display, LampStyle::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            LampStyle::All => "all",
            LampStyle::Display => "display",
            LampStyle::None => "none",
        }
    }
}

impl fmt::Display for LampStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LampStyle {
    type Err = ZinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LampStyle::All),
            "display" => Ok(LampStyle::Display),
            "none" => Ok(LampStyle::None),
            other => Err(ZinError::InvalidLampStyle(other.to_string())),
        }
    }
}

//! Runtime settings
//!
//! Loaded from a JSON file by the native driver. Missing fields fall back
//! to defaults so a settings file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Failure while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` picks one per process
    pub seed: Option<u64>,
    /// Silence every cue
    pub muted: bool,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Settings {
    /// Parse settings from JSON text and validate the tuning table
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

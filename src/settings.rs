// App settings - persisted UI configuration
//
// The selected performance settings, volume and waveform survive restarts
// as JSON in the user config directory. Recorded sequences do not.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::router::PerformanceSettings;
use crate::synth::oscillator::WaveformType;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub performance: PerformanceSettings,
    pub volume: f32,
    pub waveform: WaveformType,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            performance: PerformanceSettings::default(),
            volume: 0.5,
            waveform: WaveformType::Triangle,
        }
    }
}

impl AppSettings {
    /// Path of the settings file in the user config directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        path.push("chordboard");
        path.push("settings.json");
        Ok(path)
    }

    /// Load settings from `path`. Missing file falls back to defaults;
    /// unreadable content is an error the caller may ignore.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

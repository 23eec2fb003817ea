use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::common::{ModelConfig, OutputLocale};
use crate::data::{CaptureConfig, FsAccess};

/// Where verdicts are forwarded to the bin controller, if anywhere.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Serial device already set up for the controller (e.g. `/dev/ttyUSB0`).
    pub device_path: Option<PathBuf>,
}

/// Everything both stages can be tuned with. Every field has a default, so
/// a settings file only needs the keys it changes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub capture: CaptureConfig,
    pub model: ModelConfig,
    pub dispatch: DispatchConfig,
    pub locale: OutputLocale,
}

impl Settings {
    /// Reads `~/.config/waste_sort/settings.json` when it exists, defaults otherwise.
    pub fn load() -> Result<Self> {
        let path = FsAccess::Config.settings_file()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

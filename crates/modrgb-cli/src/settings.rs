use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Per-user defaults, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// I2C bus number, as in `/dev/i2c-<device>`.
    pub device: u32,
    /// Full-scale green output after scaling.
    pub green_scale: u8,
    /// Full-scale blue output after scaling.
    pub blue_scale: u8,
    /// Ask before and after jumper changes.
    pub prompt: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: 1,
            green_scale: 80,
            blue_scale: 50,
            prompt: true,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mod-rgb").join("settings.json"))
    }

    /// Loads `path`, or the default location when `path` is `None`.
    ///
    /// A missing file at the default location yields the defaults; an explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        log::debug!("loaded {settings:?} from {}", path.display());
        Ok(settings)
    }
}

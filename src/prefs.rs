//! Persisted user preferences.
//!
//! Theme and brightness survive across sessions as a small JSON file in
//! the platform configuration directory. Window layout is deliberately
//! not persisted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("preference i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
    pub brightness: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            brightness: 90,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted in the platform config directory
    /// (`<config>/term-desk/preferences.json`).
    pub fn default_location() -> Result<Self, PrefsError> {
        let base = dirs::config_dir().ok_or(PrefsError::NoConfigDir)?;
        Ok(Self::at(base.join("term-desk").join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved preferences; a missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences, PrefsError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Preferences::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

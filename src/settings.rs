//! Key-value settings persisted as a TOML file.
//!
//! Writes are two-phase: [`SettingsStore::set`] only mutates memory, and a
//! value survives a restart only after an explicit [`SettingsStore::save`].
//! Callers that skip the save step lose the write on exit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Settings key holding the bot credential.
pub const TOKEN_KEY: &str = "token";
/// Settings key holding the gateway address (`host:port`).
pub const GATEWAY_KEY: &str = "gateway";
/// Gateway address used when the settings file names none.
pub const DEFAULT_GATEWAY: &str = "127.0.0.1:7700";

/// On-disk payload shape: a flat string-to-string table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct SettingsMap(BTreeMap<String, String>);

/// File-backed store for single string settings.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    values: SettingsMap,
}

impl SettingsStore {
    /// Open the store at `path`, reading existing values if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsMap::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// An empty store bound to `path`, ignoring any file contents.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: SettingsMap::default(),
        }
    }

    /// Read one setting.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.0.get(key).map(String::as_str)
    }

    /// Write one setting in memory. Not visible across restarts until saved.
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.0.insert(key.to_string(), value.to_string());
    }

    /// Flush all settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = toml::to_string(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// File path backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Default settings file location under the user config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("botctl").join("settings.toml"))
}

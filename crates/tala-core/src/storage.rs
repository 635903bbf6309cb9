use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tala_config::storage::StorageConfig;
use tala_types::Settings;

use crate::error::StorageError;

/// Durable home of the persisted settings record
pub trait SettingsStorage: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Settings>, StorageError>;

    /// Overwrite the stored record
    fn save(&self, settings: &Settings) -> Result<(), StorageError>;
}

/// One pretty-printed JSON file, e.g. `.tala/setting-store.json`
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Settings>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}

/// In-process storage, for ephemeral runs and tests
#[derive(Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw JSON record, as another version may have written it
    pub fn with_record(json: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(json.into())),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SettingsStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Settings>, StorageError> {
        let record = self.record.lock().unwrap_or_else(PoisonError::into_inner);
        match record.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings)?;
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

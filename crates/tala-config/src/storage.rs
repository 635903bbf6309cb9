use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from(".tala")
}

fn default_key() -> String {
    "setting-store".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Fixed identifier of the persisted settings record
    #[serde(default = "default_key")]
    pub key: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        let dir = env::var("TALA_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_dir());

        Self {
            dir,
            key: default_key(),
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

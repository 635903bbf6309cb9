use std::env;

use serde::{Deserialize, Serialize};

use self::bridge::BridgeConfig;
use self::storage::StorageConfig;
use self::translation::TranslationConfig;

pub mod bridge;
pub mod storage;
pub mod translation;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub translation: TranslationConfig,
    pub storage: StorageConfig,

    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        let log_json = env::var("TALA_LOG_JSON")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Config {
            bridge: BridgeConfig::new(),
            translation: TranslationConfig::new(),
            storage: StorageConfig::new(),
            log_json,
        }
    }
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

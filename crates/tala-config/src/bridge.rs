use std::env;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_attempts() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Delay between availability checks
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Checks before falling back to the local stub
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base URL of the host process, e.g. `http://127.0.0.1:5173`
    pub url: Option<String>,
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self {
            poll_interval_ms: env_parse("TALA_BRIDGE_POLL_MS").unwrap_or(default_poll_interval_ms()),
            max_attempts: env_parse("TALA_BRIDGE_ATTEMPTS").unwrap_or(default_max_attempts()),
            url: env::var("TALA_BRIDGE_URL").ok().filter(|u| !u.is_empty()),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
            url: None,
        }
    }
}

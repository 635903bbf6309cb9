use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_debounce_ms() -> u64 {
    100
}

fn default_history_capacity() -> usize {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Quiet period after the last keystroke before a request is considered
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl TranslationConfig {
    pub fn new() -> Self {
        Self {
            debounce_ms: env_parse("TALA_DEBOUNCE_MS").unwrap_or(default_debounce_ms()),
            history_capacity: env_parse("TALA_HISTORY_CAPACITY")
                .unwrap_or(default_history_capacity()),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            history_capacity: default_history_capacity(),
        }
    }
}

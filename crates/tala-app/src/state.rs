use std::sync::Arc;

use tala_bridge::{BridgeGate, BridgeSlot};
use tala_config::Config;

pub struct AppState {
    pub config: Config,
    /// Filled in by the host connector once the host answers
    pub bridge_slot: BridgeSlot,
    pub gate: Arc<BridgeGate>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let bridge_slot = BridgeSlot::new();
        let gate = Arc::new(BridgeGate::new(bridge_slot.clone(), &config.bridge));

        Self {
            config,
            bridge_slot,
            gate,
        }
    }
}

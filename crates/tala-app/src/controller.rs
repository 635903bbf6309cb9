use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tala_core::history::HistoryCache;
use tala_core::orchestrator::TranslationOrchestrator;
use tala_core::settings::SettingsStore;
use tala_core::storage::{JsonFileStorage, MemoryStorage, SettingsStorage};
use tala_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{render_view, watch_bridge, watch_console};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            ui_to_app: kanal::bounded_async(64), // keystroke bursts
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn settings_storage(&self, ephemeral: bool) -> Arc<dyn SettingsStorage> {
        if ephemeral {
            tracing::info!("Settings kept in memory only");
            Arc::new(MemoryStorage::new())
        } else {
            let storage = JsonFileStorage::from_config(&self.state.config.storage);
            tracing::info!("Settings stored at {}", storage.path().display());
            Arc::new(storage)
        }
    }

    pub fn spawn_tasks(&self, storage: Arc<dyn SettingsStorage>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let config = &self.state.config;

        let (orchestrator, orchestrator_task) = TranslationOrchestrator::new(
            self.state.gate.clone(),
            HistoryCache::with_capacity(config.translation.history_capacity),
            Duration::from_millis(config.translation.debounce_ms),
        );
        let settings = SettingsStore::load(storage, self.state.gate.clone());

        // Translation pipeline
        tasks.spawn(async move {
            orchestrator_task.run().await;
            Ok(())
        });

        // Event loop
        tasks.spawn(event_loop(
            self.channels.ui_to_app.1.clone(),
            orchestrator.clone(),
            settings,
        ));

        // Console input and output
        tasks.spawn(watch_console(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));
        tasks.spawn(render_view(
            orchestrator.subscribe(),
            self.cancel_token.child_token(),
        ));

        // Host bridge
        tasks.spawn(watch_bridge(
            config.bridge.url.clone(),
            self.state.bridge_slot.clone(),
            self.state.gate.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

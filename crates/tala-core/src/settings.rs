use std::sync::Arc;

use tala_bridge::{BridgeError, BridgeGate, BridgeHandle};
use tala_types::{FontSize, ScreenMode, Settings, SettingsUpdate, Shortcut, Theme};

use crate::error::SettingsError;
use crate::storage::SettingsStorage;

/// Owner of the user's settings.
///
/// Every mutator updates memory first, then saves the whole record, then
/// forwards the change to the host. Saving and forwarding are best-effort:
/// failures are logged and never roll the in-memory value back.
pub struct SettingsStore {
    settings: Settings,
    storage: Arc<dyn SettingsStorage>,
    gate: Arc<BridgeGate>,
}

impl SettingsStore {
    /// Restore the persisted record, falling back to defaults
    pub fn load(storage: Arc<dyn SettingsStorage>, gate: Arc<BridgeGate>) -> Self {
        let settings = match storage.load() {
            Ok(Some(settings)) => {
                tracing::info!("Loaded persisted settings");
                settings
            }
            Ok(None) => {
                tracing::info!("No persisted settings, using defaults");
                Settings::default()
            }
            Err(e) => {
                tracing::error!("Failed to load settings, using defaults: {e}");
                Settings::default()
            }
        };

        Self {
            settings,
            storage,
            gate,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply one UI-requested change
    pub async fn apply(&mut self, update: SettingsUpdate) {
        match update {
            SettingsUpdate::IncreaseFontSize => {
                self.increase_font_size().await;
            }
            SettingsUpdate::DecreaseFontSize => {
                self.decrease_font_size().await;
            }
            SettingsUpdate::Theme(theme) => self.set_theme(theme).await,
            SettingsUpdate::AutoStart(enable) => self.set_auto_start(enable).await,
            SettingsUpdate::StartMinimized(enable) => self.set_start_minimized(enable).await,
            SettingsUpdate::AlwaysOnTop(enable) => self.set_always_on_top(enable).await,
            SettingsUpdate::HideToTrayOnClose(enable) => {
                self.set_hide_to_tray_on_close(enable).await
            }
            SettingsUpdate::ScreenCaptureMode(mode) => self.set_screen_capture_mode(mode).await,
            SettingsUpdate::Reset => self.reset_to_defaults().await,
        }
    }

    pub async fn set_font_size(&mut self, size: FontSize) {
        self.settings.font_size = size;
        self.persist();
        self.forward_config().await;
    }

    /// One step up the size list; no-op at the largest size
    pub async fn increase_font_size(&mut self) -> FontSize {
        if let Some(size) = self.settings.font_size.larger() {
            self.set_font_size(size).await;
        }
        self.settings.font_size
    }

    /// One step down the size list; no-op at the smallest size
    pub async fn decrease_font_size(&mut self) -> FontSize {
        if let Some(size) = self.settings.font_size.smaller() {
            self.set_font_size(size).await;
        }
        self.settings.font_size
    }

    pub async fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.persist();
        self.forward_config().await;
    }

    pub async fn set_auto_start(&mut self, enable: bool) {
        self.settings.auto_start = enable;
        self.persist();
        let result = self.bridge().await.set_auto_running(enable).await;
        report("set_auto_running", result);
    }

    pub async fn set_start_minimized(&mut self, enable: bool) {
        self.settings.start_minimized = enable;
        self.persist();
        let result = self.bridge().await.set_hide_to_tray_on_start(enable).await;
        report("set_hide_to_tray_on_start", result);
    }

    pub async fn set_always_on_top(&mut self, enable: bool) {
        self.settings.always_on_top = enable;
        self.persist();
        let result = self.bridge().await.set_always_on_top(enable).await;
        report("set_always_on_top", result);
    }

    pub async fn set_hide_to_tray_on_close(&mut self, enable: bool) {
        self.settings.hide_to_tray_on_close = enable;
        self.persist();
        let result = self.bridge().await.set_hide_to_tray_on_close(enable).await;
        report("set_hide_to_tray_on_close", result);
    }

    pub async fn set_screen_capture_mode(&mut self, mode: ScreenMode) {
        self.settings.screen_capture_mode = mode;
        self.persist();
        self.forward_config().await;
    }

    /// Replace the shortcut with the same id and register it with the host.
    ///
    /// Returns the binding the host accepted. If the host normalized it, the
    /// normalized form replaces the local one; if the call failed, the local
    /// value stands.
    pub async fn modify_shortcut(&mut self, shortcut: Shortcut) -> Result<Shortcut, SettingsError> {
        self.replace_shortcut(shortcut.clone())?;
        self.persist();

        let result = self.bridge().await.modify_hotkey(&shortcut).await;
        let Some(accepted) = report("modify_hotkey", result) else {
            return Ok(shortcut);
        };

        if accepted != shortcut {
            if accepted.id == shortcut.id {
                tracing::info!(
                    "Host normalized shortcut {}: '{}' -> '{}'",
                    shortcut.id,
                    shortcut.keybinding,
                    accepted.keybinding
                );
                self.replace_shortcut(accepted.clone())?;
                self.persist();
            } else {
                tracing::warn!(
                    "Host answered shortcut {} with mismatched id {}",
                    shortcut.id,
                    accepted.id
                );
                return Ok(shortcut);
            }
        }

        Ok(accepted)
    }

    fn replace_shortcut(&mut self, shortcut: Shortcut) -> Result<(), SettingsError> {
        let slot = self
            .settings
            .shortcuts
            .iter_mut()
            .find(|s| s.id == shortcut.id)
            .ok_or_else(|| SettingsError::UnknownShortcut(shortcut.id.clone()))?;
        *slot = shortcut;
        Ok(())
    }

    /// Restore defaults locally and push them to the host
    pub async fn reset_to_defaults(&mut self) {
        tracing::info!("Resetting settings to defaults");
        self.settings = Settings::default();
        self.persist();
        self.forward_config().await;
    }

    /// Push the full snapshot so the host matches what was loaded
    pub async fn sync_host(&self) {
        self.forward_config().await;
    }

    /// Screen-capture translation on one or all screens, per the current mode
    pub async fn capture(&self) {
        let bridge = self.bridge().await;
        match self.settings.screen_capture_mode {
            ScreenMode::Single => report("capture_single_screen", bridge.capture_single_screen().await),
            ScreenMode::Multi => report("capture_all_screens", bridge.capture_all_screens().await),
        };
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.settings) {
            tracing::error!("Failed to persist settings: {e}");
        }
    }

    async fn forward_config(&self) {
        let result = self.bridge().await.update_config(&self.settings).await;
        report("update_config", result);
    }

    async fn bridge(&self) -> BridgeHandle {
        self.gate.await_ready().await
    }
}

fn report<T>(method: &str, result: Result<T, BridgeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Forwarding {method} to host failed: {e}");
            None
        }
    }
}

use async_trait::async_trait;
use tala_types::{Settings, Shortcut};

use crate::{BridgeError, BridgeKind, HostBridge};

/// Local stand-in used when the host never shows up.
///
/// Settings calls succeed without effect so the UI stays usable. Translation
/// has no meaningful inert result, so it fails and the orchestrator clears
/// the display instead of caching a bogus value.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubBridge;

#[async_trait]
impl HostBridge for StubBridge {
    async fn translate(&self, text: &str) -> Result<String, BridgeError> {
        tracing::warn!("[STUB] translate({} chars) ignored, no host", text.len());
        Err(BridgeError::Unavailable("translate"))
    }

    async fn update_config(&self, _settings: &Settings) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] update_config");
        Ok(())
    }

    async fn set_auto_running(&self, enable: bool) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] set_auto_running({enable})");
        Ok(())
    }

    async fn set_hide_to_tray_on_start(&self, enable: bool) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] set_hide_to_tray_on_start({enable})");
        Ok(())
    }

    async fn modify_hotkey(&self, shortcut: &Shortcut) -> Result<Shortcut, BridgeError> {
        tracing::debug!("[STUB] modify_hotkey({} = {})", shortcut.id, shortcut.keybinding);
        Ok(shortcut.clone())
    }

    async fn set_always_on_top(&self, enable: bool) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] set_always_on_top({enable})");
        Ok(())
    }

    async fn set_hide_to_tray_on_close(&self, enable: bool) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] set_hide_to_tray_on_close({enable})");
        Ok(())
    }

    async fn capture_single_screen(&self) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] capture_single_screen");
        Ok(())
    }

    async fn capture_all_screens(&self) -> Result<(), BridgeError> {
        tracing::debug!("[STUB] capture_all_screens");
        Ok(())
    }

    fn kind(&self) -> BridgeKind {
        BridgeKind::Stub
    }
}

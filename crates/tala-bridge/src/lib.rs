use std::sync::Arc;

use tala_types::{Settings, Shortcut};

pub mod gate;
pub mod http;
pub mod stub;

pub use gate::{BridgeGate, BridgeSlot};
pub use http::HttpBridge;
pub use stub::StubBridge;

/// Shared handle to whichever bridge implementation the gate selected
pub type BridgeHandle = Arc<dyn HostBridge>;

/// Method surface the host process exposes to the client
#[async_trait::async_trait]
pub trait HostBridge: Send + Sync {
    /// Translate text with the host's engine
    async fn translate(&self, text: &str) -> Result<String, BridgeError>;

    /// Push the full settings snapshot
    async fn update_config(&self, settings: &Settings) -> Result<(), BridgeError>;

    async fn set_auto_running(&self, enable: bool) -> Result<(), BridgeError>;

    async fn set_hide_to_tray_on_start(&self, enable: bool) -> Result<(), BridgeError>;

    /// Register a new binding. The host may normalize it; the returned
    /// shortcut is the one it actually accepted.
    async fn modify_hotkey(&self, shortcut: &Shortcut) -> Result<Shortcut, BridgeError>;

    async fn set_always_on_top(&self, enable: bool) -> Result<(), BridgeError>;

    async fn set_hide_to_tray_on_close(&self, enable: bool) -> Result<(), BridgeError>;

    async fn capture_single_screen(&self) -> Result<(), BridgeError>;

    async fn capture_all_screens(&self) -> Result<(), BridgeError>;

    fn kind(&self) -> BridgeKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeKind {
    Host,
    Stub,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("host bridge unavailable: {0} has no local fallback")]
    Unavailable(&'static str),

    #[error("host error: {0}")]
    Host(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed host response: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

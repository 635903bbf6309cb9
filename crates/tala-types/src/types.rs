use serde::{Deserialize, Serialize};

use crate::settings::{ScreenMode, Theme};

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput(String),
    RetryTranslation,
    ShowHistory,
    ClearHistory,
    SettingsUpdate(SettingsUpdate),
    ModifyShortcut { id: String, keybinding: String },
    TriggerCapture,
    BackendReady,
    Quit,
}

/// Single settings mutation requested by the UI
#[derive(Debug, Clone)]
pub enum SettingsUpdate {
    IncreaseFontSize,
    DecreaseFontSize,
    Theme(Theme),
    AutoStart(bool),
    StartMinimized(bool),
    AlwaysOnTop(bool),
    HideToTrayOnClose(bool),
    ScreenCaptureMode(ScreenMode),
    Reset,
}

/// A committed translation. Identity is the (source, translated) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub source_text: String,
    pub translated_text: String,
}

impl HistoryEntry {
    pub fn new(source_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: String,
    pub label: String,
    /// Key combination as the host displays it, e.g. `Alt P`
    #[serde(rename = "value")]
    pub keybinding: String,
    pub description: String,
}

impl Shortcut {
    pub fn new(id: &str, label: &str, keybinding: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            keybinding: keybinding.to_string(),
            description: description.to_string(),
        }
    }
}

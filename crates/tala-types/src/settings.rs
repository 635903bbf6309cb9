use serde::{Deserialize, Serialize};

use crate::types::Shortcut;

/// Font sizes in ascending order. Stepping clamps at both ends.
pub const FONT_SIZES: [FontSize; 5] = [
    FontSize::Px12,
    FontSize::Px18,
    FontSize::Px24,
    FontSize::Px30,
    FontSize::Px36,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FontSize {
    Px12,
    #[default]
    Px18,
    Px24,
    Px30,
    Px36,
}

impl FontSize {
    pub fn px(self) -> u8 {
        match self {
            FontSize::Px12 => 12,
            FontSize::Px18 => 18,
            FontSize::Px24 => 24,
            FontSize::Px30 => 30,
            FontSize::Px36 => 36,
        }
    }

    fn index(self) -> usize {
        FONT_SIZES.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next larger size, or `None` at the maximum
    pub fn larger(self) -> Option<FontSize> {
        FONT_SIZES.get(self.index() + 1).copied()
    }

    /// Next smaller size, or `None` at the minimum
    pub fn smaller(self) -> Option<FontSize> {
        self.index().checked_sub(1).map(|i| FONT_SIZES[i])
    }
}

impl TryFrom<u8> for FontSize {
    type Error = String;

    fn try_from(px: u8) -> Result<Self, Self::Error> {
        FONT_SIZES
            .iter()
            .copied()
            .find(|s| s.px() == px)
            .ok_or_else(|| format!("unsupported font size: {px}"))
    }
}

impl From<FontSize> for u8 {
    fn from(size: FontSize) -> Self {
        size.px()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenMode {
    #[default]
    Single,
    Multi,
}

/// User-configurable behavior. Every field is part of the persisted record.
///
/// Older records were written without `hide2trayOnClose` and `screen`; those
/// still load, with the missing fields taking their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub font_size: FontSize,
    pub theme: Theme,
    pub auto_start: bool,
    pub start_minimized: bool,
    pub shortcuts: Vec<Shortcut>,
    pub always_on_top: bool,
    #[serde(alias = "hide2trayOnClose")]
    pub hide_to_tray_on_close: bool,
    #[serde(alias = "screen")]
    pub screen_capture_mode: ScreenMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: FontSize::default(),
            theme: Theme::default(),
            auto_start: false,
            start_minimized: false,
            shortcuts: default_shortcuts(),
            always_on_top: false,
            hide_to_tray_on_close: false,
            screen_capture_mode: ScreenMode::default(),
        }
    }
}

pub fn default_shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new(
            "increaseFontSize",
            "Increase font size:",
            "Ctrl +",
            "Enlarge the font of lookup and translation results",
        ),
        Shortcut::new(
            "decreaseFontSize",
            "Decrease font size:",
            "Ctrl -",
            "Shrink the font of lookup and translation results",
        ),
        Shortcut::new(
            "screenshotTranslate",
            "Screenshot translate:",
            "Alt P",
            "Start screenshot translation",
        ),
        Shortcut::new("openApp", "Open app:", "Alt D", "Show or hide the main window"),
        Shortcut::new(
            "openMiniWindow",
            "Open mini window:",
            "Alt M",
            "Open the compact lookup window",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_steps_clamp_at_ends() {
        assert_eq!(FontSize::Px36.larger(), None);
        assert_eq!(FontSize::Px12.smaller(), None);
        assert_eq!(FontSize::Px18.larger(), Some(FontSize::Px24));
        assert_eq!(FontSize::Px18.smaller(), Some(FontSize::Px12));
    }

    #[test]
    fn legacy_record_without_new_fields_loads_with_defaults() {
        let json = r#"{
            "fontSize": 24,
            "theme": "dark",
            "autoStart": true,
            "startMinimized": false,
            "shortcuts": [],
            "alwaysOnTop": true
        }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.font_size, FontSize::Px24);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.always_on_top);
        assert!(!settings.hide_to_tray_on_close);
        assert_eq!(settings.screen_capture_mode, ScreenMode::Single);
    }

    #[test]
    fn record_with_old_field_names_loads() {
        let json = r#"{ "hide2trayOnClose": true, "screen": "multi" }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.hide_to_tray_on_close);
        assert_eq!(settings.screen_capture_mode, ScreenMode::Multi);
        assert_eq!(settings.shortcuts, default_shortcuts());
    }

    #[test]
    fn unknown_font_size_is_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{ "fontSize": 13 }"#).is_err());
    }
}

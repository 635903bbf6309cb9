use tala_types::{AppEvent, ScreenMode, SettingsUpdate, Theme};

use crate::io::parse_command;

#[test]
fn plain_text_is_translation_input() {
    match parse_command("hello world") {
        Some(AppEvent::TextInput(text)) => assert_eq!(text, "hello world"),
        other => panic!("Wrong event: {:?}", other),
    }
}

#[test]
fn empty_line_clears_input() {
    match parse_command("") {
        Some(AppEvent::TextInput(text)) => assert!(text.is_empty()),
        other => panic!("Wrong event: {:?}", other),
    }
}

#[test]
fn settings_commands_parse() {
    assert!(matches!(
        parse_command(":font+"),
        Some(AppEvent::SettingsUpdate(SettingsUpdate::IncreaseFontSize))
    ));
    assert!(matches!(
        parse_command(":theme dark"),
        Some(AppEvent::SettingsUpdate(SettingsUpdate::Theme(Theme::Dark)))
    ));
    assert!(matches!(
        parse_command(":top on"),
        Some(AppEvent::SettingsUpdate(SettingsUpdate::AlwaysOnTop(true)))
    ));
    assert!(matches!(
        parse_command(":tray off"),
        Some(AppEvent::SettingsUpdate(SettingsUpdate::HideToTrayOnClose(false)))
    ));
    assert!(matches!(
        parse_command(":screen multi"),
        Some(AppEvent::SettingsUpdate(SettingsUpdate::ScreenCaptureMode(ScreenMode::Multi)))
    ));
}

#[test]
fn hotkey_keeps_multi_word_binding() {
    match parse_command(":hotkey screenshotTranslate Ctrl Shift P") {
        Some(AppEvent::ModifyShortcut { id, keybinding }) => {
            assert_eq!(id, "screenshotTranslate");
            assert_eq!(keybinding, "Ctrl Shift P");
        }
        other => panic!("Wrong event: {:?}", other),
    }
}

#[test]
fn malformed_commands_are_rejected() {
    assert!(parse_command(":theme purple").is_none());
    assert!(parse_command(":top maybe").is_none());
    assert!(parse_command(":quit now").is_none());
    assert!(parse_command(":hotkey openApp").is_none());
    assert!(parse_command(":").is_none());
    assert!(parse_command(":frobnicate").is_none());
}

use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use tala_bridge::{BridgeGate, BridgeSlot, HttpBridge};
use tala_core::orchestrator::{RequestState, TranslationView};
use tala_types::{AppEvent, HistoryEntry, ScreenMode, SettingsUpdate, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

const PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Map one console line to an app event.
///
/// Plain text is translation input; lines starting with `:` are commands.
/// Returns `None` for commands that cannot be parsed.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let Some(command) = line.strip_prefix(':') else {
        return Some(AppEvent::TextInput(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next()?;
    let arg = parts.next();

    let event = match (name, arg) {
        ("q" | "quit", None) => AppEvent::Quit,
        ("retry", None) => AppEvent::RetryTranslation,
        ("history", None) => AppEvent::ShowHistory,
        ("clear", None) => AppEvent::ClearHistory,
        ("capture", None) => AppEvent::TriggerCapture,
        ("font+", None) => AppEvent::SettingsUpdate(SettingsUpdate::IncreaseFontSize),
        ("font-", None) => AppEvent::SettingsUpdate(SettingsUpdate::DecreaseFontSize),
        ("reset", None) => AppEvent::SettingsUpdate(SettingsUpdate::Reset),
        ("theme", Some(theme)) => {
            AppEvent::SettingsUpdate(SettingsUpdate::Theme(theme.parse::<Theme>().ok()?))
        }
        ("screen", Some("single")) => {
            AppEvent::SettingsUpdate(SettingsUpdate::ScreenCaptureMode(ScreenMode::Single))
        }
        ("screen", Some("multi")) => {
            AppEvent::SettingsUpdate(SettingsUpdate::ScreenCaptureMode(ScreenMode::Multi))
        }
        ("top", Some(flag)) => AppEvent::SettingsUpdate(SettingsUpdate::AlwaysOnTop(on_off(flag)?)),
        ("tray", Some(flag)) => {
            AppEvent::SettingsUpdate(SettingsUpdate::HideToTrayOnClose(on_off(flag)?))
        }
        ("autostart", Some(flag)) => {
            AppEvent::SettingsUpdate(SettingsUpdate::AutoStart(on_off(flag)?))
        }
        ("minimized", Some(flag)) => {
            AppEvent::SettingsUpdate(SettingsUpdate::StartMinimized(on_off(flag)?))
        }
        ("hotkey", Some(id)) => {
            let keybinding = parts.collect::<Vec<_>>().join(" ");
            if keybinding.is_empty() {
                return None;
            }
            return Some(AppEvent::ModifyShortcut {
                id: id.to_string(),
                keybinding,
            });
        }
        _ => return None,
    };

    // Reject trailing arguments
    if parts.next().is_some() {
        return None;
    }

    Some(event)
}

fn on_off(flag: &str) -> Option<bool> {
    match flag {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Console stand-in for the UI: every stdin line becomes an event
pub async fn watch_console(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => return Ok(()),
        };

        let Some(line) = line else {
            tracing::info!("Console input closed");
            event_tx.send(AppEvent::Quit).await?;
            break;
        };

        match parse_command(&line) {
            Some(event) => event_tx.send(event).await?,
            None => tracing::warn!("Unrecognized command: {line}"),
        }
    }

    cancel.cancelled().await;
    Ok(())
}

/// Print each settled translation once
pub async fn render_view(
    mut view: watch::Receiver<TranslationView>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut last_shown: Option<(String, Option<String>)> = None;

    loop {
        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            _ = cancel.cancelled() => return Ok(()),
        }

        let current = view.borrow_and_update().clone();
        if current.state != RequestState::Idle {
            continue;
        }

        let shown = (current.result.clone(), current.error.clone());
        if last_shown.as_ref() == Some(&shown) {
            continue;
        }

        match &current.error {
            Some(error) => println!("! {error}"),
            None if !current.result.is_empty() => println!("> {}", current.result),
            None => {}
        }
        last_shown = Some(shown);
    }
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("(history is empty)");
        return;
    }
    for entry in entries {
        println!("{} => {}", entry.source_text, entry.translated_text);
    }
}

/// Connect to the configured host, then report once the gate has settled
pub async fn watch_bridge(
    url: Option<String>,
    slot: BridgeSlot,
    gate: Arc<BridgeGate>,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let resolve = async {
        let connector = async {
            match &url {
                Some(url) => connect_host(url, &slot).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            bridge = gate.await_ready() => bridge,
            _ = connector => gate.await_ready().await,
        }
    };

    let bridge = tokio::select! {
        bridge = resolve => bridge,
        _ = cancel.cancelled() => return Ok(()),
    };
    tracing::info!("Bridge resolved: {:?}", bridge.kind());
    event_tx.send(AppEvent::BackendReady).await?;

    cancel.cancelled().await;
    Ok(())
}

/// Probe the host until it answers, then make it visible to the gate
async fn connect_host(url: &str, slot: &BridgeSlot) {
    let bridge = HttpBridge::new(url);
    tracing::info!("Connecting to host bridge at {url}");

    loop {
        match bridge.probe().await {
            Ok(()) => {
                slot.install(Arc::new(bridge));
                return;
            }
            Err(e) => tracing::debug!("Host not reachable yet: {e}"),
        }
        tokio::time::sleep(PROBE_INTERVAL).await;
    }
}

use std::ops::ControlFlow;

use kanal::AsyncReceiver;
use tala_core::orchestrator::TranslationOrchestrator;
use tala_core::settings::SettingsStore;
use tala_types::{AppEvent, Shortcut};

use crate::io::print_history;

/// App's main loop. Sole owner of the settings store.
pub async fn event_loop(
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    orchestrator: TranslationOrchestrator,
    mut settings: SettingsStore,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        if handle_event(&orchestrator, &mut settings, event).await?.is_break() {
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Quit requested");
    Ok(())
}

async fn handle_event(
    orchestrator: &TranslationOrchestrator,
    settings: &mut SettingsStore,
    event: AppEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        AppEvent::TextInput(text) => {
            tracing::debug!("TextInput received: {} chars", text.len());
            orchestrator.set_input_text(text)?;
        }
        AppEvent::RetryTranslation => {
            orchestrator.retry()?;
        }
        AppEvent::ShowHistory => {
            print_history(&orchestrator.history().await?);
        }
        AppEvent::ClearHistory => {
            orchestrator.clear_history()?;
        }
        AppEvent::SettingsUpdate(update) => {
            settings.apply(update).await;
            tracing::debug!("Settings now: {:?}", settings.settings());
        }
        AppEvent::ModifyShortcut { id, keybinding } => {
            let existing = settings
                .settings()
                .shortcuts
                .iter()
                .find(|s| s.id == id)
                .cloned();
            let Some(existing) = existing else {
                tracing::warn!("No shortcut with id `{id}`");
                return Ok(ControlFlow::Continue(()));
            };

            let accepted = settings
                .modify_shortcut(Shortcut {
                    keybinding,
                    ..existing
                })
                .await?;
            tracing::info!("Shortcut {} bound to '{}'", accepted.id, accepted.keybinding);
        }
        AppEvent::TriggerCapture => {
            settings.capture().await;
        }
        AppEvent::BackendReady => {
            settings.sync_host().await;
        }
        AppEvent::Quit => return Ok(ControlFlow::Break(())),
    }

    Ok(ControlFlow::Continue(()))
}

use std::sync::Arc;
use std::time::Duration;

use tala_bridge::BridgeGate;
use tala_types::HistoryEntry;
use tokio::time::{Instant, sleep, timeout};

use super::mock::{MockBridge, absent_gate, ready_gate};
use crate::error::OrchestratorError;
use crate::history::HistoryCache;
use crate::orchestrator::{RequestState, TranslationOrchestrator, TranslationView};

const DEBOUNCE: Duration = Duration::from_millis(100);

fn spawn(gate: Arc<BridgeGate>, history: HistoryCache) -> TranslationOrchestrator {
    let (orchestrator, task) = TranslationOrchestrator::new(gate, history, DEBOUNCE);
    tokio::spawn(task.run());
    orchestrator
}

async fn settle(
    orchestrator: &TranslationOrchestrator,
    done: impl FnMut(&TranslationView) -> bool,
) -> TranslationView {
    let mut view = orchestrator.subscribe();
    let settled = timeout(Duration::from_secs(5), view.wait_for(done))
        .await
        .expect("timed out waiting for translation view")
        .expect("orchestrator stopped");
    settled.clone()
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_collapses_into_one_request() {
    let mock = MockBridge::new();
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("a").unwrap();
    sleep(Duration::from_millis(30)).await;
    orchestrator.set_input_text("ab").unwrap();
    sleep(Duration::from_millis(30)).await;
    orchestrator.set_input_text("abc").unwrap();

    let view = settle(&orchestrator, |v| v.result == "ABC").await;

    assert_eq!(mock.translate_calls(), vec!["abc"]);
    assert_eq!(view.input, "abc");
    assert_eq!(view.state, RequestState::Idle);
    assert_eq!(
        orchestrator.history().await.unwrap(),
        vec![HistoryEntry::new("abc", "ABC")]
    );
}

#[tokio::test(start_paused = true)]
async fn input_is_not_evaluated_before_debounce_window_closes() {
    let mock = MockBridge::new();
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("hello").unwrap();
    sleep(Duration::from_millis(60)).await;

    assert!(mock.translate_calls().is_empty());
    assert_eq!(orchestrator.current().state, RequestState::Debouncing);
}

#[tokio::test(start_paused = true)]
async fn history_hit_skips_the_backend() {
    let mock = MockBridge::new();
    let mut history = HistoryCache::new();
    history.add("hello", "hola");
    let orchestrator = spawn(ready_gate(&mock), history);

    orchestrator.set_input_text("hello").unwrap();
    let view = settle(&orchestrator, |v| v.result == "hola").await;

    assert!(mock.translate_calls().is_empty());
    assert_eq!(view.state, RequestState::Idle);
    assert_eq!(orchestrator.history().await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn repeated_input_is_served_from_history() {
    let mock = MockBridge::new();
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("abc").unwrap();
    settle(&orchestrator, |v| v.result == "ABC").await;
    orchestrator.set_input_text("xyz").unwrap();
    settle(&orchestrator, |v| v.result == "XYZ").await;
    orchestrator.set_input_text("abc").unwrap();
    settle(&orchestrator, |v| v.result == "ABC" && v.state == RequestState::Idle).await;

    assert_eq!(mock.translate_calls(), vec!["abc", "xyz"]);
    assert_eq!(orchestrator.source_texts().await.unwrap(), vec!["xyz", "abc"]);
}

#[tokio::test(start_paused = true)]
async fn slow_request_is_superseded_by_newer_input() {
    let mock = MockBridge::new();
    mock.delay("foo", Duration::from_millis(500));
    mock.delay("bar", Duration::from_millis(50));
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("foo").unwrap();
    sleep(Duration::from_millis(150)).await;
    assert_eq!(orchestrator.current().state, RequestState::InFlight);

    orchestrator.set_input_text("bar").unwrap();
    settle(&orchestrator, |v| v.result == "BAR").await;

    // Well past the point where "foo" would have resolved
    sleep(Duration::from_secs(1)).await;

    let view = orchestrator.current();
    assert_eq!(view.result, "BAR");
    assert_eq!(view.state, RequestState::Idle);
    assert_eq!(mock.translate_calls(), vec!["foo", "bar"]);
    assert_eq!(
        orchestrator.history().await.unwrap(),
        vec![HistoryEntry::new("bar", "BAR")]
    );
}

#[tokio::test(start_paused = true)]
async fn result_for_input_user_moved_past_is_dropped() {
    let mock = MockBridge::new();
    mock.delay("foo", Duration::from_millis(120));
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("foo").unwrap();
    sleep(Duration::from_millis(150)).await;
    orchestrator.set_input_text("food").unwrap();
    settle(&orchestrator, |v| v.state == RequestState::Superseded).await;

    // "foo" completes during the new debounce window
    sleep(Duration::from_millis(80)).await;
    assert_eq!(orchestrator.current().result, "");

    settle(&orchestrator, |v| v.result == "FOOD").await;
    assert_eq!(orchestrator.source_texts().await.unwrap(), vec!["food"]);
}

#[tokio::test(start_paused = true)]
async fn retyping_same_text_keeps_the_running_request() {
    let mock = MockBridge::new();
    mock.delay("abc", Duration::from_millis(200));
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("abc").unwrap();
    sleep(Duration::from_millis(250)).await;
    orchestrator.set_input_text("abc").unwrap();

    let view = settle(&orchestrator, |v| {
        v.result == "ABC" && v.state == RequestState::Idle
    })
    .await;

    assert_eq!(view.input, "abc");
    assert_eq!(mock.translate_calls(), vec!["abc"]);
    assert_eq!(orchestrator.source_texts().await.unwrap(), vec!["abc"]);
}

#[tokio::test(start_paused = true)]
async fn history_hit_cancels_outstanding_request() {
    let mock = MockBridge::new();
    mock.delay("foo", Duration::from_millis(500));
    let mut history = HistoryCache::new();
    history.add("hello", "hola");
    let orchestrator = spawn(ready_gate(&mock), history);

    orchestrator.set_input_text("foo").unwrap();
    sleep(Duration::from_millis(150)).await;
    orchestrator.set_input_text("hello").unwrap();
    settle(&orchestrator, |v| v.result == "hola").await;

    sleep(Duration::from_secs(1)).await;

    assert_eq!(orchestrator.current().result, "hola");
    assert_eq!(orchestrator.source_texts().await.unwrap(), vec!["hello"]);
}

#[tokio::test(start_paused = true)]
async fn empty_input_clears_result_without_request() {
    let mock = MockBridge::new();
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("hello").unwrap();
    settle(&orchestrator, |v| v.result == "HELLO").await;

    orchestrator.set_input_text(" \n\t ").unwrap();
    let view = settle(&orchestrator, |v| v.result.is_empty()).await;

    assert_eq!(view.state, RequestState::Idle);
    assert_eq!(mock.translate_calls(), vec!["hello"]);
}

#[tokio::test(start_paused = true)]
async fn failure_clears_result_and_retry_recovers() {
    let mock = MockBridge::new();
    mock.set_failing("boom", true);
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("boom").unwrap();
    let view = settle(&orchestrator, |v| v.error.is_some()).await;

    assert_eq!(view.result, "");
    assert!(orchestrator.history().await.unwrap().is_empty());

    mock.set_failing("boom", false);
    orchestrator.retry().unwrap();
    let view = settle(&orchestrator, |v| v.result == "BOOM").await;

    assert_eq!(view.error, None);
    assert_eq!(mock.translate_calls(), vec!["boom", "boom"]);
}

#[tokio::test(start_paused = true)]
async fn missing_host_yields_error_instead_of_hanging() {
    let orchestrator = spawn(absent_gate(), HistoryCache::new());
    let start = Instant::now();

    orchestrator.set_input_text("hello").unwrap();
    let view = settle(&orchestrator, |v| v.error.is_some()).await;

    assert_eq!(view.result, "");
    assert!(start.elapsed() <= Duration::from_millis(1200));
    assert!(orchestrator.history().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn steady_typing_does_not_hold_off_the_host_fallback() {
    let gate = absent_gate();
    let orchestrator = spawn(gate.clone(), HistoryCache::new());

    let mut text = String::new();
    for _ in 0..8 {
        text.push('a');
        orchestrator.set_input_text(text.clone()).unwrap();
        sleep(Duration::from_millis(400)).await;
    }

    assert!(gate.get().is_some());

    let view = settle(&orchestrator, |v| v.error.is_some()).await;
    assert_eq!(view.input, "aaaaaaaa");
}

#[tokio::test(start_paused = true)]
async fn clear_history_forgets_translations() {
    let mock = MockBridge::new();
    let orchestrator = spawn(ready_gate(&mock), HistoryCache::new());

    orchestrator.set_input_text("hello").unwrap();
    settle(&orchestrator, |v| v.result == "HELLO").await;
    orchestrator.clear_history().unwrap();

    assert!(orchestrator.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn handle_reports_stopped_task() {
    let mock = MockBridge::new();
    let (orchestrator, task) =
        TranslationOrchestrator::new(ready_gate(&mock), HistoryCache::new(), DEBOUNCE);
    drop(task);

    assert!(matches!(
        orchestrator.set_input_text("hello"),
        Err(OrchestratorError::Closed)
    ));
    assert!(matches!(
        orchestrator.history().await,
        Err(OrchestratorError::Closed)
    ));
}

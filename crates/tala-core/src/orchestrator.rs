//! Live-typing translation pipeline.
//!
//! [`TranslationOrchestrator`] is a cheap, cloneable handle. All state lives in
//! [`OrchestratorTask`], which must be spawned once and owns the history cache
//! exclusively. Per input stream the task tracks two things: a pending
//! debounce deadline and at most one in-flight bridge call. Together they give
//! the stream state:
//!
//! | pending | in flight | state |
//! |---|---|---|
//! | no  | no  | `Idle` |
//! | yes | no  | `Debouncing` |
//! | no  | yes | `InFlight` |
//! | yes | yes | `Superseded` (input moved on while a call runs) |
//!
//! When the debounce deadline fires, the last input is evaluated: an empty
//! input clears the result. A cache hit is shown directly. Otherwise any
//! outstanding call is cancelled and a new one is issued. A completion is
//! committed only if it belongs to the current call and the pending input is
//! still the text it was issued for.

use std::sync::Arc;
use std::time::Duration;

use tala_bridge::{BridgeError, BridgeGate};
use tala_types::HistoryEntry;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::OrchestratorError;
use crate::history::HistoryCache;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Debouncing,
    InFlight,
    Superseded,
}

/// What the UI binds to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationView {
    pub input: String,
    pub result: String,
    /// Last translation failure, cleared by the next successful evaluation
    pub error: Option<String>,
    pub state: RequestState,
}

enum Command {
    Input(String),
    Retry,
    History(oneshot::Sender<Vec<HistoryEntry>>),
    ClearHistory,
}

struct Completion {
    generation: u64,
    text: String,
    result: Result<String, BridgeError>,
}

struct InFlight {
    generation: u64,
    text: String,
    cancel: CancellationToken,
}

#[derive(Clone)]
pub struct TranslationOrchestrator {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<TranslationView>,
}

impl TranslationOrchestrator {
    pub fn new(
        gate: Arc<BridgeGate>,
        history: HistoryCache,
        debounce: Duration,
    ) -> (Self, OrchestratorTask) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(TranslationView::default());

        let task = OrchestratorTask {
            gate,
            history,
            debounce,
            commands: commands_rx,
            done_tx,
            done_rx,
            view: view_tx,
            input: String::new(),
            result: String::new(),
            error: None,
            deadline: None,
            in_flight: None,
            generation: 0,
        };

        let handle = Self {
            commands: commands_tx,
            view: view_rx,
        };

        (handle, task)
    }

    /// Record the latest input and restart the debounce window
    pub fn set_input_text(&self, text: impl Into<String>) -> Result<(), OrchestratorError> {
        self.send(Command::Input(text.into()))
    }

    /// Evaluate the current input right away
    pub fn retry(&self) -> Result<(), OrchestratorError> {
        self.send(Command::Retry)
    }

    pub fn clear_history(&self) -> Result<(), OrchestratorError> {
        self.send(Command::ClearHistory)
    }

    /// Snapshot of the history cache, newest first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, OrchestratorError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::History(tx))?;
        rx.await.map_err(|_| OrchestratorError::Closed)
    }

    pub async fn source_texts(&self) -> Result<Vec<String>, OrchestratorError> {
        Ok(self
            .history()
            .await?
            .into_iter()
            .map(|e| e.source_text)
            .collect())
    }

    pub fn subscribe(&self) -> watch::Receiver<TranslationView> {
        self.view.clone()
    }

    pub fn current(&self) -> TranslationView {
        self.view.borrow().clone()
    }

    fn send(&self, command: Command) -> Result<(), OrchestratorError> {
        self.commands
            .send(command)
            .map_err(|_| OrchestratorError::Closed)
    }
}

pub struct OrchestratorTask {
    gate: Arc<BridgeGate>,
    history: HistoryCache,
    debounce: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
    view: watch::Sender<TranslationView>,

    input: String,
    result: String,
    error: Option<String>,
    deadline: Option<Instant>,
    in_flight: Option<InFlight>,
    generation: u64,
}

impl OrchestratorTask {
    /// Runs until every handle has been dropped
    pub async fn run(mut self) {
        tracing::debug!("[TRANSLATE] orchestrator started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = self.done_rx.recv() => self.handle_completion(done),
                _ = debounce_elapsed(self.deadline) => self.evaluate(),
            }
        }

        self.cancel_in_flight();
        tracing::debug!("[TRANSLATE] orchestrator stopped");
    }

    fn state(&self) -> RequestState {
        match (self.deadline.is_some(), self.in_flight.is_some()) {
            (false, false) => RequestState::Idle,
            (true, false) => RequestState::Debouncing,
            (false, true) => RequestState::InFlight,
            (true, true) => RequestState::Superseded,
        }
    }

    fn publish(&self) {
        self.view.send_replace(TranslationView {
            input: self.input.clone(),
            result: self.result.clone(),
            error: self.error.clone(),
            state: self.state(),
        });
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Input(text) => {
                self.input = text;
                self.deadline = Some(Instant::now() + self.debounce);
                self.publish();
            }
            Command::Retry => {
                self.deadline = Some(Instant::now());
                self.publish();
            }
            Command::History(reply) => {
                let _ = reply.send(self.history.entries());
            }
            Command::ClearHistory => {
                tracing::info!("Clearing {} history entries", self.history.len());
                self.history.clear();
            }
        }
    }

    fn evaluate(&mut self) {
        self.deadline = None;
        let text = self.input.clone();

        if text.trim().is_empty() {
            self.cancel_in_flight();
            self.result.clear();
            self.error = None;
            self.publish();
            return;
        }

        if let Some(cached) = self.history.lookup(&text) {
            tracing::debug!("[TRANSLATE] history hit: {text}");
            self.result = cached.to_string();
            self.error = None;
            self.cancel_in_flight();
            self.publish();
            return;
        }

        if self.in_flight.as_ref().is_some_and(|f| f.text == text) {
            tracing::debug!("[TRANSLATE] request for the same input already in flight");
            self.publish();
            return;
        }

        self.cancel_in_flight();
        self.issue(text);
        self.publish();
    }

    fn issue(&mut self, text: String) {
        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();

        tracing::debug!("[TRANSLATE] request #{generation}: {} chars", text.len());

        let gate = self.gate.clone();
        let done_tx = self.done_tx.clone();
        let token = cancel.clone();
        let request_text = text.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => Err(BridgeError::Cancelled),
                result = async {
                    let bridge = gate.await_ready().await;
                    bridge.translate(&request_text).await
                } => result,
            };

            let _ = done_tx.send(Completion {
                generation,
                text: request_text,
                result,
            });
        });

        self.in_flight = Some(InFlight {
            generation,
            text,
            cancel,
        });
    }

    fn cancel_in_flight(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            tracing::debug!("[TRANSLATE] request #{} superseded", flight.generation);
            flight.cancel.cancel();
        }
    }

    fn handle_completion(&mut self, done: Completion) {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == done.generation && !f.cancel.is_cancelled());
        if !is_current {
            tracing::debug!("[TRANSLATE] discarding result of request #{}", done.generation);
            return;
        }
        self.in_flight = None;

        if self.deadline.is_some() && self.input != done.text {
            // Input changed after this call started; its result is already stale
            tracing::debug!("[TRANSLATE] discarding stale result for '{}'", done.text);
            self.publish();
            return;
        }

        match done.result {
            Ok(translated) => {
                self.history.add(&done.text, &translated);
                self.result = translated;
                self.error = None;
            }
            Err(BridgeError::Cancelled) => {}
            Err(e) => {
                tracing::error!("Translation failed: {e}");
                self.result.clear();
                self.error = Some(e.to_string());
            }
        }

        self.publish();
    }
}

async fn debounce_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

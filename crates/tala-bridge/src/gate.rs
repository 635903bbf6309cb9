use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::Duration;

use tala_config::bridge::BridgeConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::stub::StubBridge;
use crate::BridgeHandle;

/// Where the host bridge appears once it has been injected
#[derive(Clone, Default)]
pub struct BridgeSlot {
    inner: Arc<RwLock<Option<BridgeHandle>>>,
}

impl BridgeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, bridge: BridgeHandle) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(bridge);
    }

    pub fn get(&self) -> Option<BridgeHandle> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Resolves to a usable bridge, falling back to [`StubBridge`] when the host
/// does not appear within `poll_interval * max_attempts`.
///
/// The first caller starts a single background poller. Every caller,
/// including ones dropped before it finishes, waits on that same poller and
/// receives the same handle.
pub struct BridgeGate {
    slot: BridgeSlot,
    poll_interval: Duration,
    max_attempts: u32,
    ready: Arc<watch::Sender<Option<BridgeHandle>>>,
    poller: OnceLock<JoinHandle<()>>,
}

impl BridgeGate {
    pub fn new(slot: BridgeSlot, config: &BridgeConfig) -> Self {
        Self::with_timing(
            slot,
            Duration::from_millis(config.poll_interval_ms),
            config.max_attempts,
        )
    }

    pub fn with_timing(slot: BridgeSlot, poll_interval: Duration, max_attempts: u32) -> Self {
        let (ready, _) = watch::channel(None);
        Self {
            slot,
            poll_interval,
            max_attempts,
            ready: Arc::new(ready),
            poller: OnceLock::new(),
        }
    }

    pub async fn await_ready(&self) -> BridgeHandle {
        self.start_polling();

        let mut ready = self.ready.subscribe();
        let resolved = match ready.wait_for(Option::is_some).await {
            Ok(bridge) => bridge.clone(),
            Err(_) => None,
        };
        resolved.unwrap_or_else(|| Arc::new(StubBridge))
    }

    /// Resolved handle, if the wait already finished
    pub fn get(&self) -> Option<BridgeHandle> {
        self.ready.borrow().clone()
    }

    fn start_polling(&self) {
        self.poller.get_or_init(|| {
            let slot = self.slot.clone();
            let ready = self.ready.clone();
            let (poll_interval, max_attempts) = (self.poll_interval, self.max_attempts);

            tokio::spawn(async move {
                let bridge = poll(slot, poll_interval, max_attempts).await;
                ready.send_replace(Some(bridge));
            })
        });
    }
}

impl Drop for BridgeGate {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.get() {
            poller.abort();
        }
    }
}

async fn poll(slot: BridgeSlot, poll_interval: Duration, max_attempts: u32) -> BridgeHandle {
    let mut interval = tokio::time::interval(poll_interval);

    for attempt in 1..=max_attempts {
        interval.tick().await;

        if let Some(bridge) = slot.get() {
            tracing::info!("Host bridge ready after {attempt} attempt(s)");
            return bridge;
        }
        tracing::debug!("Host bridge not ready (attempt {attempt}/{max_attempts})");
    }

    tracing::warn!("Host bridge unavailable after {max_attempts} attempts, using local stub");
    Arc::new(StubBridge)
}

//! Debounced fetch-and-publish controller.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use block_core::{LifecycleObserver, LifecyclePhase, RenderSnapshot, RenderState};
use block_data::{FetchError, RenderClient, RenderRequest};

use crate::ControllerConfig;

/// Fields shared between the controller and its fetch continuations.
///
/// These are the only mutable values a continuation may touch: the token is
/// written once at issue time and compared once at settle time, the active
/// flag is consulted before any state mutation.
struct Shared {
    client: RenderClient,
    /// Token of the most recently issued fetch; only it may mutate state.
    token: AtomicU64,
    /// Cleared on deactivation.
    active: AtomicBool,
    tx: watch::Sender<RenderSnapshot>,
    /// First observer wins; set before activation.
    observer: OnceLock<Arc<dyn LifecycleObserver>>,
    started: Instant,
}

impl Shared {
    fn phase(&self, phase: LifecyclePhase) {
        if let Some(observer) = self.observer.get() {
            observer.on_phase(phase, self.started.elapsed());
        }
    }

    /// Mint the next token and flag the snapshot as loading.
    ///
    /// The settled state is left untouched so a previous successful render
    /// stays visible underneath a loading overlay.
    fn begin_fetch(&self) -> u64 {
        let token = self.token.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_modify(|snapshot| snapshot.loading = true);
        self.phase(LifecyclePhase::FetchIssued(token));
        token
    }

    /// Apply a fetch outcome if this fetch is still the authoritative one.
    fn settle(&self, token: u64, outcome: Result<String, FetchError>) {
        if self.token.load(Ordering::SeqCst) != token || !self.active.load(Ordering::SeqCst) {
            debug!(token, "discarding superseded render result");
            self.phase(LifecyclePhase::FetchDiscarded(token));
            return;
        }

        self.tx.send_modify(|snapshot| {
            snapshot.loading = false;
            snapshot.state = match outcome {
                Ok(html) => RenderState::from_rendered(html),
                Err(err) => RenderState::Error(err.to_string()),
            };
        });
        self.phase(LifecyclePhase::FetchResolved(token));
    }

    async fn run_fetch(self: Arc<Self>, request: RenderRequest) {
        let token = self.begin_fetch();
        debug!(token, block = %request.block, "issuing render fetch");
        let outcome = self.client.fetch(&request).await;
        self.settle(token, outcome);
    }
}

/// Drives the fetch lifecycle for one block preview.
///
/// Activation issues a fetch immediately; later input changes are debounced,
/// and rapid successive changes collapse into a single fetch at the end of
/// the quiet period. Snapshots are published over a watch channel so hosts
/// observe state without polling.
pub struct RenderController {
    shared: Arc<Shared>,
    config: ControllerConfig,
    request: RenderRequest,
    /// Pending debounced fetch, aborted on every qualifying change.
    pending: Option<JoinHandle<()>>,
}

impl RenderController {
    /// Create a controller with default config.
    pub fn new(client: RenderClient, request: RenderRequest) -> Self {
        Self::with_config(client, request, ControllerConfig::default())
    }

    /// Create a controller with explicit config.
    pub fn with_config(
        client: RenderClient,
        request: RenderRequest,
        config: ControllerConfig,
    ) -> Self {
        let (tx, _rx) = watch::channel(RenderSnapshot::initial());
        Self {
            shared: Arc::new(Shared {
                client,
                token: AtomicU64::new(0),
                active: AtomicBool::new(false),
                tx,
                observer: OnceLock::new(),
                started: Instant::now(),
            }),
            config,
            request,
            pending: None,
        }
    }

    /// Attach a lifecycle observer. The first observer wins.
    pub fn with_observer(self, observer: Arc<dyn LifecycleObserver>) -> Self {
        let _ = self.shared.observer.set(observer);
        self
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        self.shared.tx.subscribe()
    }

    /// Get the current snapshot.
    pub fn snapshot(&self) -> RenderSnapshot {
        self.shared.tx.borrow().clone()
    }

    /// Get the current request inputs.
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    /// Whether the controller is active.
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    /// Activate the preview. The first fetch is issued immediately, not
    /// debounced. Must be called from within a tokio runtime.
    pub fn activate(&mut self) {
        self.shared.active.store(true, Ordering::SeqCst);
        self.shared.phase(LifecyclePhase::Activated);
        tokio::spawn(Arc::clone(&self.shared).run_fetch(self.request.clone()));
    }

    /// Replace the request inputs.
    ///
    /// Deep-equal inputs are a no-op. A change (re)starts the debounce
    /// window. Returns whether a fetch was scheduled.
    pub fn update(&mut self, request: RenderRequest) -> bool {
        if request == self.request {
            return false;
        }
        self.request = request.clone();

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        if !self.shared.active.load(Ordering::SeqCst) {
            return false;
        }

        let shared = Arc::clone(&self.shared);
        let debounce = self.config.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if !shared.active.load(Ordering::SeqCst) {
                return;
            }
            shared.run_fetch(request).await;
        }));
        true
    }

    /// Tear the preview down. Any in-flight resolution after this point is
    /// discarded by the active check; the pending debounce is aborted.
    pub fn deactivate(&mut self) {
        self.shared.active.store(false, Ordering::SeqCst);
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.shared.phase(LifecyclePhase::Deactivated);
    }
}

impl Drop for RenderController {
    fn drop(&mut self) {
        self.shared.active.store(false, Ordering::SeqCst);
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

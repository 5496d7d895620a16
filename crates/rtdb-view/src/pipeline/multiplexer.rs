//! DataSourceMultiplexer: owns the single active data source of a pipeline.
//!
//! # Invariants
//!
//! - At most one source is open at any time. The previous source is
//!   released (unsubscribed or aborted) before the next one is opened.
//! - Every source is tagged with a generation. Deliveries check it under the
//!   `current` gate and a switch bumps it under the same gate, so once a
//!   switch begins no event of the superseded source reaches the sink.
//! - `close` is terminal. Once it has been called no source is opened again.
//!
//! # Re-entrancy
//!
//! The gate is a `parking_lot::ReentrantMutex`: a sink callback may switch
//! sources on the same thread while a delivery is in progress. Requests made
//! while a switch is already running are queued (latest wins) and processed
//! by the running call before it returns.
//!
//! One-shot fetches run as tokio tasks; `switch` must be called from within
//! a runtime.

use std::cell::Cell;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use tokio::task::JoinHandle;

use crate::config::ViewerConfig;
use crate::query::Query;
use crate::reactive::Subscription;
use crate::reference::NodeRef;
use crate::storage::{StoreEvent, StoreListener, TreeStore};

use super::live::LiveSnapshot;
use super::view_model::SourceEvent;

/// Receives the events of whichever source is current.
pub type SourceSink = Arc<dyn Fn(SourceEvent) + Send + Sync>;

/// The triple a source is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub reference: NodeRef,
    pub query: Query,
    pub continuous: bool,
}

/// What the multiplexer is currently bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiplexerState {
    Idle,
    Active(SourceKey),
}

/// Open/close counters. `opened - closed` never exceeds one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub opened: u64,
    pub closed: u64,
}

impl SourceStats {
    /// Sources currently open: zero or one.
    pub fn open_sources(&self) -> u64 {
        self.opened - self.closed
    }
}

enum SourceHandle {
    Live(Subscription),
    Fetch(JoinHandle<()>),
}

impl SourceHandle {
    fn release(self) {
        match self {
            SourceHandle::Live(subscription) => subscription.unsubscribe(),
            SourceHandle::Fetch(task) => task.abort(),
        }
    }
}

struct ActiveSource {
    key: SourceKey,
    handle: SourceHandle,
}

enum Request {
    Switch(SourceKey),
    Release,
}

#[derive(Default)]
struct RequestQueue {
    pending: Option<Request>,
    running: bool,
    /// Set by `close`; switches are refused from then on.
    closed: bool,
}

/// Delivery side, shared with source callbacks and fetch tasks.
struct Delivery {
    /// Generation allowed to deliver.
    current: ReentrantMutex<Cell<u64>>,
    sink: SourceSink,
}

impl Delivery {
    fn deliver(&self, generation: u64, event: SourceEvent) {
        let current = self.current.lock();
        if current.get() != generation {
            tracing::trace!(
                generation,
                current = current.get(),
                "dropping event from superseded source"
            );
            return;
        }
        (self.sink)(event);
    }
}

/// Switches between one-shot and continuous sources for a pipeline.
pub struct DataSourceMultiplexer {
    store: Arc<dyn TreeStore>,
    page_size: usize,
    delivery: Arc<Delivery>,
    active: Mutex<Option<ActiveSource>>,
    queue: Mutex<RequestQueue>,
    stats: Mutex<SourceStats>,
}

impl DataSourceMultiplexer {
    /// Create an idle multiplexer that feeds `sink`.
    pub fn new(store: Arc<dyn TreeStore>, config: &ViewerConfig, sink: SourceSink) -> Self {
        Self {
            store,
            page_size: config.page_size(),
            delivery: Arc::new(Delivery {
                current: ReentrantMutex::new(Cell::new(0)),
                sink,
            }),
            active: Mutex::new(None),
            queue: Mutex::new(RequestQueue::default()),
            stats: Mutex::new(SourceStats::default()),
        }
    }

    /// Replace the active source with one bound to the given triple.
    ///
    /// Always re-establishes the source, even when the triple is unchanged.
    pub fn switch(&self, reference: &NodeRef, query: Query, continuous: bool) {
        self.submit(Request::Switch(SourceKey {
            reference: reference.clone(),
            query,
            continuous,
        }));
    }

    /// Release the active source and return to `Idle`.
    pub fn release(&self) {
        self.submit(Request::Release);
    }

    /// Release the active source and refuse every later switch.
    ///
    /// Terminal: a switch already queued, or issued afterwards by a callback
    /// that was mid-delivery when this was called, opens nothing.
    pub fn close(&self) {
        self.queue.lock().closed = true;
        self.submit(Request::Release);
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.queue.lock().closed
    }

    /// The triple the active source is bound to, or `Idle`.
    pub fn state(&self) -> MultiplexerState {
        match self.active.lock().as_ref() {
            Some(active) => MultiplexerState::Active(active.key.clone()),
            None => MultiplexerState::Idle,
        }
    }

    /// Sources opened and closed so far.
    pub fn stats(&self) -> SourceStats {
        *self.stats.lock()
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn submit(&self, request: Request) {
        {
            let mut queue = self.queue.lock();
            if queue.closed && matches!(request, Request::Switch(_)) {
                tracing::trace!("ignoring switch on closed multiplexer");
                return;
            }
            queue.pending = Some(request);
            if queue.running {
                return;
            }
            queue.running = true;
        }

        loop {
            let request = {
                let mut queue = self.queue.lock();
                match queue.pending.take() {
                    Some(request) => request,
                    None => {
                        queue.running = false;
                        return;
                    }
                }
            };
            self.process(request);
        }
    }

    fn process(&self, request: Request) {
        let current = self.delivery.current.lock();
        let generation = current.get() + 1;
        // Silence the old source before tearing it down.
        current.set(generation);

        let previous = self.active.lock().take();
        if let Some(previous) = previous {
            tracing::debug!(
                reference = %previous.key.reference,
                continuous = previous.key.continuous,
                "releasing data source"
            );
            previous.handle.release();
            self.stats.lock().closed += 1;
        }

        let Request::Switch(key) = request else {
            return;
        };
        if self.queue.lock().closed {
            return;
        }

        let limit = key.query.effective_limit(self.page_size);
        tracing::debug!(
            reference = %key.reference,
            continuous = key.continuous,
            limit,
            generation,
            "activating data source"
        );

        self.stats.lock().opened += 1;
        self.delivery.deliver(generation, SourceEvent::LoadingStarted);
        let handle = if key.continuous {
            self.open_live(&key, limit, generation)
        } else {
            self.open_fetch(&key, limit, generation)
        };
        *self.active.lock() = Some(ActiveSource { key, handle });
    }

    fn open_live(&self, key: &SourceKey, limit: usize, generation: u64) -> SourceHandle {
        let live = Mutex::new(LiveSnapshot::new());
        let delivery = Arc::clone(&self.delivery);
        let reference = key.reference.clone();

        let listener: StoreListener = Arc::new(move |event: StoreEvent| {
            if let StoreEvent::Error(error) = &event {
                tracing::debug!(
                    reference = %reference,
                    error = %error,
                    "continuous listener failed"
                );
            }
            let out = live.lock().apply(event);
            delivery.deliver(generation, out);
        });

        SourceHandle::Live(self.store.listen(&key.reference, &key.query, limit, listener))
    }

    fn open_fetch(&self, key: &SourceKey, limit: usize, generation: u64) -> SourceHandle {
        let store = Arc::clone(&self.store);
        let delivery = Arc::clone(&self.delivery);
        let reference = key.reference.clone();
        let query = key.query.clone();

        SourceHandle::Fetch(tokio::spawn(async move {
            let event = match store.fetch(&reference, &query, limit).await {
                Ok(snapshot) => SourceEvent::from(snapshot),
                Err(error) => {
                    tracing::debug!(
                        reference = %reference,
                        error = %error,
                        "one-shot fetch failed"
                    );
                    SourceEvent::Error(error)
                }
            };
            delivery.deliver(generation, event);
        }))
    }
}

impl Drop for DataSourceMultiplexer {
    fn drop(&mut self) {
        if let Some(active) = self.active.get_mut().take() {
            active.handle.release();
            self.stats.get_mut().closed += 1;
        }
    }
}

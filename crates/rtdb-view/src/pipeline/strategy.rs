//! StrategyDecider: decides, per node, whether continuous updates are safe.
//!
//! `observe` emits an optimistic guess immediately and then corrects it once
//! the store's size probe resolves. Probing runs as a tokio task, so
//! `observe` must be called from within a runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::ViewerConfig;
use crate::reactive::{Observable, ReplaySubject, Subscription};
use crate::reference::NodeRef;
use crate::storage::TreeStore;

pub struct StrategyDecider {
    store: Arc<dyn TreeStore>,
    config: ViewerConfig,
}

impl StrategyDecider {
    pub fn new(store: Arc<dyn TreeStore>, config: ViewerConfig) -> Self {
        Self { store, config }
    }

    /// Start observing `reference`. Each call probes independently.
    pub fn observe(&self, reference: &NodeRef) -> StrategyObservation {
        let flag = ReplaySubject::new(self.config.optimistic_continuous);
        let closed = Arc::new(AtomicBool::new(false));

        let probe = tokio::spawn(probe_loop(
            Arc::clone(&self.store),
            reference.clone(),
            self.config.continuous_threshold,
            self.config.reprobe_interval(),
            flag.clone(),
            Arc::clone(&closed),
        ));

        StrategyObservation {
            flag,
            probe,
            closed,
        }
    }
}

async fn probe_loop(
    store: Arc<dyn TreeStore>,
    reference: NodeRef,
    threshold: usize,
    interval: Option<Duration>,
    flag: ReplaySubject<bool>,
    closed: Arc<AtomicBool>,
) {
    loop {
        let result = store.probe_size(&reference).await;
        if closed.load(Ordering::SeqCst) {
            tracing::trace!(reference = %reference, "discarding probe result after close");
            return;
        }

        match result {
            Ok(size) => {
                let continuous = size <= threshold;
                if flag.value() != continuous {
                    tracing::debug!(
                        reference = %reference,
                        size,
                        threshold,
                        continuous,
                        "strategy changed"
                    );
                    flag.next(continuous);
                }
            }
            Err(error) => {
                tracing::warn!(
                    reference = %reference,
                    error = %error,
                    "size probe failed, falling back to one-shot fetches"
                );
                if flag.value() {
                    flag.next(false);
                }
                return;
            }
        }

        let Some(interval) = interval else {
            return;
        };
        tokio::time::sleep(interval).await;
    }
}

/// Live strategy stream for one reference.
///
/// Replays the current flag to new subscribers. Never completes on its own;
/// [`close`](Self::close) or drop stops probing.
pub struct StrategyObservation {
    flag: ReplaySubject<bool>,
    probe: JoinHandle<()>,
    closed: Arc<AtomicBool>,
}

impl StrategyObservation {
    /// Whether continuous updates are currently considered safe.
    pub fn is_continuous(&self) -> bool {
        self.flag.value()
    }

    /// Stop probing. A probe completing afterwards is discarded.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.probe.abort();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Observable<bool> for StrategyObservation {
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.flag.subscribe(callback)
    }
}

impl Drop for StrategyObservation {
    fn drop(&mut self) {
        self.close();
    }
}

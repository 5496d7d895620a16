//! EventEmitter<T>: typed synchronous pub/sub.
//!
//! `emit` delivers to a snapshot of the listener list taken under the lock,
//! and the lock is released before any callback runs. Listeners may therefore
//! register or remove listeners (including themselves) from inside a
//! callback. A listener removed mid-round still sees the current event; one
//! added mid-round first sees the next event.
//!
//! Consumers that must not observe an event after unsubscribing (the
//! multiplexer's source sinks) gate delivery themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::subscription::Subscription;

/// Handle returned by [`EventEmitter::on`], accepted by [`EventEmitter::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback shape stored by the emitter.
pub type ListenerFn<T> = dyn Fn(&T) + Send + Sync;

struct Slot<T> {
    id: ListenerId,
    callback: Arc<ListenerFn<T>>,
}

/// Listener registry keyed by [`ListenerId`], in registration order.
pub struct EventEmitter<T> {
    slots: Mutex<Vec<Slot<T>>>,
    next_id: AtomicU64,
}

impl<T: 'static> EventEmitter<T> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register `callback` and return the id that removes it.
    pub fn on(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.slots.lock().push(Slot {
            id,
            callback: Arc::new(callback),
        });
        id
    }

    /// Remove a listener. Unknown or already removed ids are ignored.
    pub fn off(&self, id: ListenerId) {
        self.slots.lock().retain(|slot| slot.id != id);
    }

    /// Register `callback` and hand back a [`Subscription`] that removes it.
    ///
    /// The subscription only holds a weak reference: it never keeps the
    /// emitter alive and does nothing once the emitter is gone.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.on(callback);
        let emitter = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(emitter) = emitter.upgrade() {
                emitter.off(id);
            }
        })
    }

    /// Deliver `event` to every listener registered when the call starts.
    /// Returns how many were called.
    pub fn emit(&self, event: &T) -> usize {
        let round: Vec<Arc<ListenerFn<T>>> = self
            .slots
            .lock()
            .iter()
            .map(|slot| Arc::clone(&slot.callback))
            .collect();
        for callback in &round {
            callback(event);
        }
        round.len()
    }

    /// Number of registered listeners.
    pub fn size(&self) -> usize {
        self.slots.lock().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

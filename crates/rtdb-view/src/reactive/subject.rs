//! ReplaySubject<T>: a replay-latest value stream.
//!
//! Holds the most recent value. New subscribers receive that value
//! synchronously inside `subscribe`, then every later `next` in order.
//! Delivery order across concurrent producers is not defined; the pipeline
//! drives every subject from a single logical thread of control.

use std::sync::Arc;

use parking_lot::Mutex;

use super::event_emitter::EventEmitter;
use super::subscription::Subscription;

/// Anything that can be subscribed to with a typed callback.
pub trait Observable<T> {
    /// Register `callback`; dropping the returned subscription removes it.
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static;
}

struct SubjectInner<T> {
    latest: Mutex<T>,
    emitter: Arc<EventEmitter<T>>,
}

/// Cloneable handle; clones share the same value and listeners.
pub struct ReplaySubject<T> {
    inner: Arc<SubjectInner<T>>,
}

impl<T: Clone + Send + 'static> ReplaySubject<T> {
    /// Create a subject holding `initial` as its latest value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(SubjectInner {
                latest: Mutex::new(initial),
                emitter: Arc::new(EventEmitter::new()),
            }),
        }
    }

    /// Store `value` as the latest and emit it to every listener.
    pub fn next(&self, value: T) {
        *self.inner.latest.lock() = value.clone();
        self.inner.emitter.emit(&value);
    }

    /// Clone of the latest value.
    pub fn value(&self) -> T {
        self.inner.latest.lock().clone()
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.emitter.size()
    }
}

impl<T: Clone + Send + 'static> Observable<T> for ReplaySubject<T> {
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        let replay = self.value();
        let subscription = {
            let callback = Arc::clone(&callback);
            self.inner.emitter.subscribe(move |value| callback(value))
        };
        callback(&replay);
        subscription
    }
}

impl<T> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

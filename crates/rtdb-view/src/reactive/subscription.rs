//! Subscription: an owned, one-shot cancellation token.

use std::fmt;

/// An owned one-shot closure that removes a subscription when called.
pub type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

/// Handle to a live subscription.
///
/// The release closure runs exactly once: on [`Subscription::unsubscribe`]
/// or when the handle is dropped, whichever comes first. Release is
/// synchronous; when it returns, the producer has dropped the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Unsubscribe>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Combine two handles into one that releases both, `first` first.
    pub fn join(first: Subscription, second: Subscription) -> Self {
        Self::new(move || {
            first.unsubscribe();
            second.unsubscribe();
        })
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

//! combine_latest: re-fire on any upstream change.
//!
//! Keeps the latest value seen from each of two sources and calls the
//! callback with both once each has produced at least one value, then again
//! after every later emission from either side.

use std::sync::Arc;

use parking_lot::Mutex;

use super::subject::Observable;
use super::subscription::Subscription;

struct Latest<A, B> {
    left: Option<A>,
    right: Option<B>,
}

impl<A: Clone, B: Clone> Latest<A, B> {
    fn pair(&self) -> Option<(A, B)> {
        match (&self.left, &self.right) {
            (Some(a), Some(b)) => Some((a.clone(), b.clone())),
            _ => None,
        }
    }
}

/// Subscribe to `left` and `right` and call `callback` with the latest pair.
///
/// The returned subscription releases both upstream subscriptions. With
/// replay-latest sources the callback fires once synchronously, before this
/// function returns.
pub fn combine_latest<A, B, L, R, F>(left: &L, right: &R, callback: F) -> Subscription
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    L: Observable<A>,
    R: Observable<B>,
    F: Fn(&A, &B) + Send + Sync + 'static,
{
    let latest = Arc::new(Mutex::new(Latest::<A, B> {
        left: None,
        right: None,
    }));
    let callback = Arc::new(callback);

    let left_sub = {
        let latest = Arc::clone(&latest);
        let callback = Arc::clone(&callback);
        left.subscribe(move |a: &A| {
            let pair = {
                let mut st = latest.lock();
                st.left = Some(a.clone());
                st.pair()
            };
            if let Some((a, b)) = pair {
                callback(&a, &b);
            }
        })
    };

    let right_sub = {
        let latest = Arc::clone(&latest);
        right.subscribe(move |b: &B| {
            let pair = {
                let mut st = latest.lock();
                st.right = Some(b.clone());
                st.pair()
            };
            if let Some((a, b)) = pair {
                callback(&a, &b);
            }
        })
    };

    Subscription::join(left_sub, right_sub)
}

//! QueryChannel: ordered, replay-latest intake for query intents.

use crate::query::Query;
use crate::reactive::{Observable, ReplaySubject, Subscription};

/// Shared intake/output pair for query changes.
///
/// Clones share the same stream. Starts at [`Query::Default`]. Identical
/// consecutive pushes are all delivered.
#[derive(Clone)]
pub struct QueryChannel {
    subject: ReplaySubject<Query>,
}

impl QueryChannel {
    pub fn new() -> Self {
        Self {
            subject: ReplaySubject::new(Query::Default),
        }
    }

    pub fn push(&self, query: Query) {
        self.subject.next(query);
    }

    /// Most recently pushed query.
    pub fn latest(&self) -> Query {
        self.subject.value()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subject.listener_count()
    }
}

impl Default for QueryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Observable<Query> for QueryChannel {
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Query) + Send + Sync + 'static,
    {
        self.subject.subscribe(callback)
    }
}

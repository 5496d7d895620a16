/// Backing store boundary for the view-model pipeline.
///
/// `TreeStore` is the narrow client interface the pipeline consumes: a
/// continuous listener, a one-shot bounded fetch and a size probe. The wire
/// protocol behind it belongs to the implementor.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::query::Query;
use crate::reactive::Subscription;
use crate::reference::NodeRef;

/// Bounded view of one node: either a scalar value or an ordered window of
/// child keys. A missing node has neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSnapshot {
    pub value: Option<Value>,
    pub children: Vec<String>,
}

impl NodeSnapshot {
    pub fn leaf(value: Value) -> Self {
        Self {
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn parent(children: Vec<String>) -> Self {
        Self {
            value: None,
            children,
        }
    }
}

/// Event delivered by a continuous listener.
///
/// The first event of a healthy listener is always `Snapshot`.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Full state of the listened window.
    Snapshot(NodeSnapshot),
    /// `key` entered the window right after `previous` (`None` = first).
    ChildAdded {
        key: String,
        previous: Option<String>,
    },
    /// `key` left the window.
    ChildRemoved { key: String },
    /// The node's own scalar value changed (`None` = no longer a scalar).
    ValueChanged(Option<Value>),
    /// The listener failed; no further events follow.
    Error(StoreError),
}

/// Callback receiving listener events, in store order.
pub type StoreListener = Arc<dyn Fn(StoreEvent) + Send + Sync>;

/// Realtime tree store client.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks.
#[async_trait]
pub trait TreeStore: Send + Sync {
    /// Open a continuous listener on `reference` restricted to the first
    /// `limit` children. Dropping or unsubscribing the returned handle must
    /// stop delivery before it returns.
    fn listen(
        &self,
        reference: &NodeRef,
        query: &Query,
        limit: usize,
        listener: StoreListener,
    ) -> Subscription;

    /// Fetch the first `limit` children (or the scalar value) once.
    ///
    /// Dropping the future cancels the request.
    async fn fetch(
        &self,
        reference: &NodeRef,
        query: &Query,
        limit: usize,
    ) -> Result<NodeSnapshot, StoreError>;

    /// Cheap size estimate for `reference` (number of direct children).
    async fn probe_size(&self, reference: &NodeRef) -> Result<usize, StoreError>;
}

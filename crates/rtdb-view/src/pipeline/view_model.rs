//! ViewModel and the raw source events folded into it.

use serde_json::Value;

use crate::error::StoreError;
use crate::query::Query;

/// Render-ready projection of one node's current data state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub is_loading: bool,
    /// Present when the node holds a scalar.
    pub value: Option<Value>,
    /// Child keys in fetch order.
    pub children: Vec<String>,
}

impl ViewModel {
    /// State before any source has reported.
    pub fn initial() -> Self {
        Self {
            is_loading: true,
            value: None,
            children: Vec::new(),
        }
    }

    /// A node renders as a leaf only when it has no children under the
    /// default query. No children under an explicit query is an empty page.
    pub fn is_leaf_render(&self, query: &Query) -> bool {
        self.children.is_empty() && query.is_default()
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::initial()
    }
}

/// Event emitted by the active data source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    LoadingStarted,
    Value(Value),
    Children(Vec<String>),
    Error(StoreError),
}

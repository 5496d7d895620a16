//! LiveSnapshot: running state of a continuous listener.
//!
//! Applies the store's incremental events to the last full snapshot and
//! turns each one into the source event describing the resulting state.

use serde_json::Value;

use crate::storage::{NodeSnapshot, StoreEvent};

use super::view_model::SourceEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveSnapshot {
    value: Option<Value>,
    children: Vec<String>,
}

impl LiveSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Fold `event` in and return the event to forward downstream.
    pub fn apply(&mut self, event: StoreEvent) -> SourceEvent {
        match event {
            StoreEvent::Snapshot(NodeSnapshot { value, children }) => {
                self.value = value;
                self.children = children;
            }
            StoreEvent::ChildAdded { key, previous } => {
                self.value = None;
                self.children.retain(|k| k != &key);
                // An unknown predecessor appends.
                let at = match previous {
                    None => 0,
                    Some(p) => self
                        .children
                        .iter()
                        .position(|k| *k == p)
                        .map_or(self.children.len(), |i| i + 1),
                };
                self.children.insert(at, key);
            }
            StoreEvent::ChildRemoved { key } => {
                self.children.retain(|k| k != &key);
            }
            StoreEvent::ValueChanged(value) => {
                if value.is_some() {
                    self.children.clear();
                }
                self.value = value;
            }
            StoreEvent::Error(error) => return SourceEvent::Error(error),
        }
        self.current()
    }

    /// The source event describing the current state.
    pub fn current(&self) -> SourceEvent {
        match &self.value {
            Some(value) => SourceEvent::Value(value.clone()),
            None => SourceEvent::Children(self.children.clone()),
        }
    }
}

impl From<NodeSnapshot> for SourceEvent {
    fn from(snapshot: NodeSnapshot) -> Self {
        match snapshot.value {
            Some(value) => SourceEvent::Value(value),
            None => SourceEvent::Children(snapshot.children),
        }
    }
}

//! MemoryTree: an in-memory `TreeStore` over a JSON document.
//!
//! Reads are pure in-memory lookups. Writes update the document and then
//! notify live listeners, each of which diffs its previously delivered window
//! against the new one and forwards the difference as incremental events.
//!
//! Child order is insertion order (`serde_json` is built with
//! `preserve_order`). Only the limit of a query is honored; ordering and
//! range fields are accepted and ignored.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::query::Query;
use crate::reactive::{EventEmitter, Subscription};
use crate::reference::NodeRef;

use super::traits::{NodeSnapshot, StoreEvent, StoreListener, TreeStore};

// ============================================================================
// Tree helpers
// ============================================================================

fn child_of<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn node_at<'a>(root: &'a Value, reference: &NodeRef) -> Option<&'a Value> {
    reference
        .segments()
        .iter()
        .try_fold(root, |node, key| child_of(node, key))
        .filter(|node| !node.is_null())
}

/// Bounded snapshot of `reference`: the scalar value, or the first `limit`
/// child keys.
fn window(root: &Value, reference: &NodeRef, limit: usize) -> NodeSnapshot {
    match node_at(root, reference) {
        None => NodeSnapshot::default(),
        Some(Value::Object(map)) => NodeSnapshot::parent(map.keys().take(limit).cloned().collect()),
        Some(Value::Array(items)) => NodeSnapshot::parent(
            (0..items.len()).take(limit).map(|i| i.to_string()).collect(),
        ),
        Some(scalar) => NodeSnapshot::leaf(scalar.clone()),
    }
}

fn child_count(root: &Value, reference: &NodeRef) -> usize {
    match node_at(root, reference) {
        Some(Value::Object(map)) => map.len(),
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    }
}

fn as_object(node: &mut Value) -> &mut Map<String, Value> {
    if let Value::Array(items) = node {
        let map = std::mem::take(items)
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect();
        *node = Value::Object(map);
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

/// Write `value` at `path` below `node`. `Null` removes the entry and prunes
/// parents left empty, matching realtime-database semantics.
fn write_at(node: &mut Value, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *node = value;
        return;
    };
    if value.is_null() && child_of(node, head).is_none() {
        return;
    }
    let map = as_object(node);
    if rest.is_empty() {
        if value.is_null() {
            map.shift_remove(head);
        } else {
            map.insert(head.clone(), value);
        }
        return;
    }
    let child = map.entry(head.clone()).or_insert(Value::Null);
    write_at(child, rest, value);
    let prune = match child {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        _ => false,
    };
    if prune {
        map.shift_remove(head);
    }
}

/// Incremental events turning `old` into `new`.
fn diff(old: &NodeSnapshot, new: &NodeSnapshot) -> Vec<StoreEvent> {
    let mut events = Vec::new();

    for key in &old.children {
        if !new.children.contains(key) {
            events.push(StoreEvent::ChildRemoved { key: key.clone() });
        }
    }

    if old.value != new.value {
        events.push(StoreEvent::ValueChanged(new.value.clone()));
    }

    let mut previous: Option<String> = None;
    for key in &new.children {
        if !old.children.contains(key) {
            events.push(StoreEvent::ChildAdded {
                key: key.clone(),
                previous: previous.clone(),
            });
        }
        previous = Some(key.clone());
    }

    events
}

// ============================================================================
// MemoryTree
// ============================================================================

/// In-memory realtime tree.
///
/// Interior mutability via `parking_lot::Mutex`; the document lock is never
/// held while listener callbacks run.
pub struct MemoryTree {
    root: Arc<Mutex<Value>>,
    /// Emits the reference of every write.
    changes: Arc<EventEmitter<NodeRef>>,
    fetch_failure: Mutex<Option<StoreError>>,
    probe_failure: Mutex<Option<StoreError>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::with_data(Value::Object(Map::new()))
    }

    pub fn with_data(root: Value) -> Self {
        Self {
            root: Arc::new(Mutex::new(root)),
            changes: Arc::new(EventEmitter::new()),
            fetch_failure: Mutex::new(None),
            probe_failure: Mutex::new(None),
        }
    }

    /// Replace the value at `reference`. `Null` removes it.
    pub fn set(&self, reference: &NodeRef, value: Value) {
        write_at(&mut self.root.lock(), reference.segments(), value);
        self.changes.emit(reference);
    }

    pub fn remove(&self, reference: &NodeRef) {
        self.set(reference, Value::Null);
    }

    /// Merge `children` into the node at `reference`; `Null` entries remove.
    pub fn update(&self, reference: &NodeRef, children: Map<String, Value>) {
        {
            let mut root = self.root.lock();
            for (key, value) in children {
                let child = reference.child(key);
                write_at(&mut root, child.segments(), value);
            }
        }
        self.changes.emit(reference);
    }

    /// Current value at `reference` (`None` if absent).
    pub fn get(&self, reference: &NodeRef) -> Option<Value> {
        node_at(&self.root.lock(), reference).cloned()
    }

    /// Make every subsequent fetch fail with `error` (`None` restores).
    pub fn set_fetch_failure(&self, error: Option<StoreError>) {
        *self.fetch_failure.lock() = error;
    }

    /// Make every subsequent probe fail with `error` (`None` restores).
    pub fn set_probe_failure(&self, error: Option<StoreError>) {
        *self.probe_failure.lock() = error;
    }

    /// Number of open continuous listeners.
    pub fn listener_count(&self) -> usize {
        self.changes.size()
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreeStore for MemoryTree {
    fn listen(
        &self,
        reference: &NodeRef,
        _query: &Query,
        limit: usize,
        listener: StoreListener,
    ) -> Subscription {
        let initial = window(&self.root.lock(), reference, limit);
        let delivered = Arc::new(Mutex::new(initial.clone()));

        let subscription = {
            let root = Arc::clone(&self.root);
            let reference = reference.clone();
            let listener = Arc::clone(&listener);
            self.changes.subscribe(move |changed: &NodeRef| {
                if !reference.contains(changed) && !changed.contains(&reference) {
                    return;
                }
                let current = window(&root.lock(), &reference, limit);
                let events = {
                    let mut last = delivered.lock();
                    let events = diff(&last, &current);
                    *last = current;
                    events
                };
                for event in events {
                    listener(event);
                }
            })
        };

        listener(StoreEvent::Snapshot(initial));
        subscription
    }

    async fn fetch(
        &self,
        reference: &NodeRef,
        _query: &Query,
        limit: usize,
    ) -> Result<NodeSnapshot, StoreError> {
        if let Some(error) = self.fetch_failure.lock().clone() {
            return Err(error);
        }
        Ok(window(&self.root.lock(), reference, limit))
    }

    async fn probe_size(&self, reference: &NodeRef) -> Result<usize, StoreError> {
        if let Some(error) = self.probe_failure.lock().clone() {
            return Err(error);
        }
        Ok(child_count(&self.root.lock(), reference))
    }
}

//! NodeController: per-node presentation state on top of a pipeline.
//!
//! Holds the query the node was last asked to show and derives everything a
//! row renderer needs: leaf or parent, whether a "load more" affordance
//! applies, and the references of the children to recurse into.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::config::ViewerConfig;
use crate::error::{Result, ViewError};
use crate::pipeline::{ViewModel, ViewModelPipeline};
use crate::query::Query;
use crate::reference::NodeRef;
use crate::storage::TreeStore;

use super::pagination;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    Leaf { value: Option<Value> },
    Parent { children: Vec<String> },
}

pub fn render_mode(view_model: &ViewModel, query: &Query) -> RenderMode {
    if view_model.is_leaf_render(query) {
        RenderMode::Leaf {
            value: view_model.value.clone(),
        }
    } else {
        RenderMode::Parent {
            children: view_model.children.clone(),
        }
    }
}

pub struct NodeController {
    pipeline: ViewModelPipeline,
    query: Mutex<Query>,
    page_size: usize,
}

impl NodeController {
    /// Must be called from within a tokio runtime.
    pub fn new(reference: NodeRef, store: Arc<dyn TreeStore>, config: ViewerConfig) -> Self {
        let page_size = config.page_size();
        let pipeline = ViewModelPipeline::builder(reference, store)
            .config(config)
            .build();
        Self {
            pipeline,
            query: Mutex::new(Query::Default),
            page_size,
        }
    }

    pub fn reference(&self) -> &NodeRef {
        self.pipeline.reference()
    }

    pub fn pipeline(&self) -> &ViewModelPipeline {
        &self.pipeline
    }

    pub fn query(&self) -> Query {
        self.query.lock().clone()
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.lock().is_default()
    }

    /// Record `query` as the node's query and push it downstream.
    pub fn update_query(&self, query: Query) -> Result<()> {
        if self.pipeline.is_disposed() {
            return Err(ViewError::Disposed);
        }
        *self.query.lock() = query.clone();
        self.pipeline.push_query(query)
    }

    /// Re-fetch with one more page.
    pub fn load_more(&self) -> Result<()> {
        let next = pagination::load_more(&self.query(), self.page_size);
        self.update_query(next)
    }

    pub fn view_model(&self) -> ViewModel {
        self.pipeline.current()
    }

    pub fn render(&self) -> RenderMode {
        render_mode(&self.view_model(), &self.query())
    }

    pub fn has_more(&self) -> bool {
        pagination::has_more(self.view_model().children.len(), &self.query(), self.page_size)
    }

    pub fn child_refs(&self) -> Vec<NodeRef> {
        let reference = self.reference();
        self.view_model()
            .children
            .into_iter()
            .map(|key| reference.child(key))
            .collect()
    }

    pub fn dispose(&self) {
        self.pipeline.dispose();
    }
}

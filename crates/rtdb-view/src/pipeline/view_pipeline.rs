//! ViewModelPipeline: composition root binding one node reference to a
//! stream of view models.
//!
//! ```text
//! StrategyDecider ─┐
//!                  ├─ combine_latest ─> DataSourceMultiplexer ─> Reduce ─> ViewModel stream
//! QueryChannel ────┘
//! ```
//!
//! A pipeline is bound to a single reference for its whole life. Showing a
//! different node means disposing this pipeline and building another.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::ViewerConfig;
use crate::error::{Result, ViewError};
use crate::query::Query;
use crate::reactive::{combine_latest, Observable, ReplaySubject, Subscription};
use crate::reference::NodeRef;
use crate::storage::TreeStore;

use super::multiplexer::{DataSourceMultiplexer, MultiplexerState, SourceSink, SourceStats};
use super::query_channel::QueryChannel;
use super::reducer::{Reduce, ViewModelReducer};
use super::strategy::{StrategyDecider, StrategyObservation};
use super::view_model::{SourceEvent, ViewModel};

// ============================================================================
// Builder
// ============================================================================

pub struct PipelineBuilder {
    reference: NodeRef,
    store: Arc<dyn TreeStore>,
    config: ViewerConfig,
    queries: Option<QueryChannel>,
    reducer: Option<Arc<dyn Reduce>>,
}

impl PipelineBuilder {
    pub fn config(mut self, config: ViewerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an externally owned query channel instead of a private one.
    pub fn query_channel(mut self, queries: QueryChannel) -> Self {
        self.queries = Some(queries);
        self
    }

    pub fn reducer(mut self, reducer: Arc<dyn Reduce>) -> Self {
        self.reducer = Some(reducer);
        self
    }

    /// Wire the pipeline and open its first data source.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> ViewModelPipeline {
        let queries = self.queries.unwrap_or_default();
        let reducer = self
            .reducer
            .unwrap_or_else(|| Arc::new(ViewModelReducer));
        let view_models = ReplaySubject::new(ViewModel::initial());
        let (watch_tx, _) = watch::channel(ViewModel::initial());
        let watch_tx = Arc::new(watch_tx);
        let disposed = Arc::new(AtomicBool::new(false));

        let sink: SourceSink = {
            let view_models = view_models.clone();
            let watch_tx = Arc::clone(&watch_tx);
            let disposed = Arc::clone(&disposed);
            let reference = self.reference.clone();
            Arc::new(move |event: SourceEvent| {
                if disposed.load(Ordering::SeqCst) {
                    tracing::trace!(reference = %reference, "dropping event after dispose");
                    return;
                }
                let next = reducer.reduce(&view_models.value(), &event);
                watch_tx.send_replace(next.clone());
                view_models.next(next);
            })
        };

        let multiplexer = Arc::new(DataSourceMultiplexer::new(
            Arc::clone(&self.store),
            &self.config,
            sink,
        ));
        let strategy = StrategyDecider::new(self.store, self.config).observe(&self.reference);

        let wiring = {
            let multiplexer = Arc::clone(&multiplexer);
            let reference = self.reference.clone();
            combine_latest(&strategy, &queries, move |continuous: &bool, query: &Query| {
                multiplexer.switch(&reference, query.clone(), *continuous);
            })
        };

        tracing::debug!(reference = %self.reference, "view-model pipeline created");

        ViewModelPipeline {
            reference: self.reference,
            queries,
            strategy,
            multiplexer,
            view_models,
            watch_tx,
            wiring: Mutex::new(Some(wiring)),
            disposed,
        }
    }
}

// ============================================================================
// ViewModelPipeline
// ============================================================================

pub struct ViewModelPipeline {
    reference: NodeRef,
    queries: QueryChannel,
    strategy: StrategyObservation,
    multiplexer: Arc<DataSourceMultiplexer>,
    view_models: ReplaySubject<ViewModel>,
    watch_tx: Arc<watch::Sender<ViewModel>>,
    wiring: Mutex<Option<Subscription>>,
    disposed: Arc<AtomicBool>,
}

impl ViewModelPipeline {
    pub fn builder(reference: NodeRef, store: Arc<dyn TreeStore>) -> PipelineBuilder {
        PipelineBuilder {
            reference,
            store,
            config: ViewerConfig::default(),
            queries: None,
            reducer: None,
        }
    }

    /// Build a pipeline with the default config, reducer and a private
    /// query channel.
    pub fn new(reference: NodeRef, store: Arc<dyn TreeStore>) -> Self {
        Self::builder(reference, store).build()
    }

    pub fn reference(&self) -> &NodeRef {
        &self.reference
    }

    /// Push a query intent. Fails once the pipeline is disposed.
    pub fn push_query(&self, query: Query) -> Result<()> {
        if self.is_disposed() {
            return Err(ViewError::Disposed);
        }
        self.queries.push(query);
        Ok(())
    }

    pub fn query_channel(&self) -> &QueryChannel {
        &self.queries
    }

    /// Subscribe to view models. The current one is replayed immediately.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ViewModel) + Send + Sync + 'static,
    ) -> Subscription {
        self.view_models.subscribe(callback)
    }

    /// Async view of the same stream.
    pub fn watch(&self) -> watch::Receiver<ViewModel> {
        self.watch_tx.subscribe()
    }

    pub fn current(&self) -> ViewModel {
        self.view_models.value()
    }

    pub fn is_continuous(&self) -> bool {
        self.strategy.is_continuous()
    }

    pub fn source_state(&self) -> MultiplexerState {
        self.multiplexer.state()
    }

    pub fn source_stats(&self) -> SourceStats {
        self.multiplexer.stats()
    }

    /// Tear the graph down: stop reacting to strategy and query changes,
    /// stop probing and release the active source. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(wiring) = self.wiring.lock().take() {
            wiring.unsubscribe();
        }
        self.strategy.close();
        self.multiplexer.close();
        tracing::debug!(reference = %self.reference, "view-model pipeline disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl Drop for ViewModelPipeline {
    fn drop(&mut self) {
        self.dispose();
    }
}

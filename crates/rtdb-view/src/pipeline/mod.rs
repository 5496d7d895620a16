//! View-model pipeline: turns a node reference plus query intents into a
//! stream of render-ready view models.
//!
//! # Modules
//!
//! - [`strategy`]: [`StrategyDecider`]: push vs. pull per reference.
//! - [`query_channel`]: [`QueryChannel`]: replay-latest query intake.
//! - [`multiplexer`]: [`DataSourceMultiplexer`]: the single active source.
//! - [`live`]: [`LiveSnapshot`]: folds incremental listener events.
//! - [`reducer`]: [`Reduce`] / [`ViewModelReducer`].
//! - [`view_model`]: [`ViewModel`] and [`SourceEvent`].
//! - [`view_pipeline`]: [`ViewModelPipeline`], the composition root.

pub mod live;
pub mod multiplexer;
pub mod query_channel;
pub mod reducer;
pub mod strategy;
pub mod view_model;
pub mod view_pipeline;

pub use live::LiveSnapshot;
pub use multiplexer::{DataSourceMultiplexer, MultiplexerState, SourceKey, SourceSink, SourceStats};
pub use query_channel::QueryChannel;
pub use reducer::{Reduce, ViewModelReducer};
pub use strategy::{StrategyDecider, StrategyObservation};
pub use view_model::{SourceEvent, ViewModel};
pub use view_pipeline::{PipelineBuilder, ViewModelPipeline};

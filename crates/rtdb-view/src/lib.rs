pub mod config;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod reactive;
pub mod reference;
pub mod storage;
pub mod view;

pub use config::ViewerConfig;
pub use error::{Result, StoreError, ViewError};
pub use pipeline::{QueryChannel, ViewModel, ViewModelPipeline};
pub use query::{Query, QueryParams};
pub use reference::NodeRef;
pub use storage::{MemoryTree, TreeStore};

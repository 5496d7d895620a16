//! ViewModelReducer: pure fold of source events into view-model snapshots.

use super::view_model::{SourceEvent, ViewModel};

/// Produces the next view model from the previous one and a source event.
///
/// Implementations must be pure: the pipeline calls `reduce` synchronously,
/// in source order, and publishes the result as-is.
pub trait Reduce: Send + Sync {
    fn reduce(&self, prev: &ViewModel, event: &SourceEvent) -> ViewModel;
}

/// The standard reducer.
///
/// Loading keeps the previous data visible and errors keep the last good
/// state, so refetches and failures never blank the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModelReducer;

impl Reduce for ViewModelReducer {
    fn reduce(&self, prev: &ViewModel, event: &SourceEvent) -> ViewModel {
        match event {
            SourceEvent::LoadingStarted => ViewModel {
                is_loading: true,
                ..prev.clone()
            },
            SourceEvent::Value(payload) => ViewModel {
                is_loading: false,
                value: Some(payload.clone()),
                children: Vec::new(),
            },
            SourceEvent::Children(keys) => ViewModel {
                is_loading: false,
                value: None,
                children: keys.clone(),
            },
            SourceEvent::Error(_) => ViewModel {
                is_loading: false,
                ..prev.clone()
            },
        }
    }
}

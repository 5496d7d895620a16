//! Viewer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Default number of children fetched per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Default number of direct children above which continuous updates are
/// considered unsafe for a node.
pub const DEFAULT_CONTINUOUS_THRESHOLD: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Page size used when the active query carries no explicit limit.
    pub default_page_size: NonZeroUsize,
    /// A node whose probed size is greater than this uses one-shot fetches.
    pub continuous_threshold: usize,
    /// Strategy emitted before the first size probe resolves.
    pub optimistic_continuous: bool,
    /// Re-probe period in milliseconds (`None` = probe once per reference).
    pub reprobe_interval_ms: Option<u64>,
}

impl ViewerConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn page_size(&self) -> usize {
        self.default_page_size.get()
    }

    pub fn reprobe_interval(&self) -> Option<Duration> {
        self.reprobe_interval_ms.map(Duration::from_millis)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            continuous_threshold: DEFAULT_CONTINUOUS_THRESHOLD,
            optimistic_continuous: true,
            reprobe_interval_ms: None,
        }
    }
}

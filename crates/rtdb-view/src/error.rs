use thiserror::Error;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// An error reported by the backing store client.
///
/// `Clone` so that it can travel inside source events and be observed by
/// several listeners.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Permission denied at {0}")]
    PermissionDenied(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

// ---------------------------------------------------------------------------
// ViewError: top-level rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid viewer configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("View-model pipeline has been disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, ViewError>;

//! NodeRef: an immutable handle to a location in the database tree.

use std::fmt;
use std::sync::Arc;

/// Location of a node, stored as its path segments from the root.
///
/// Cloning is cheap (the segments are shared). Two references to the same
/// location compare equal and hash identically regardless of how they were
/// built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    segments: Arc<[String]>,
}

impl NodeRef {
    /// The tree root.
    pub fn root() -> Self {
        Self {
            segments: Arc::from(Vec::new()),
        }
    }

    /// Parse a slash-separated path. Empty segments are ignored, so `""`,
    /// `"/"` and `"//"` all denote the root.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            segments: Arc::from(segments),
        }
    }

    /// Last path segment, `None` at the root.
    pub fn key(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent reference, `None` only at the root.
    pub fn parent(&self) -> Option<NodeRef> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: Arc::from(rest.to_vec()),
        })
    }

    /// Reference to the direct child `key`.
    pub fn child(&self, key: impl Into<String>) -> NodeRef {
        let mut segments = self.segments.to_vec();
        segments.push(key.into());
        Self {
            segments: Arc::from(segments),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether `self` is `other` or one of its ancestors.
    pub fn contains(&self, other: &NodeRef) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in self.segments.iter() {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({self})")
    }
}

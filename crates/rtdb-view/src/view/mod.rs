//! Presentation decisions: what a tree-row renderer derives from each
//! view model. No drawing happens here.

pub mod controller;
pub mod pagination;
pub mod parent;

pub use controller::{render_mode, NodeController, RenderMode};
pub use pagination::{has_more, load_more};
pub use parent::{ChildrenDisplay, ParentState};

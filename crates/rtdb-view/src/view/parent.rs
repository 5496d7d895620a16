//! ParentState: local UI state of an expanded/collapsed parent row.

use crate::reference::NodeRef;

/// How a parent lays out its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildrenDisplay {
    #[default]
    TreeView,
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentState {
    label: String,
    is_root: bool,
    expanded: bool,
    display: ChildrenDisplay,
}

impl ParentState {
    /// The root starts expanded; every other parent starts collapsed.
    pub fn new(reference: &NodeRef) -> Self {
        let is_root = reference.is_root();
        let label = reference
            .key()
            .map_or_else(|| reference.to_string(), str::to_string);
        Self {
            label,
            is_root,
            expanded: is_root,
            display: ChildrenDisplay::TreeView,
        }
    }

    /// Key of the node, or its path at the root.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn display(&self) -> ChildrenDisplay {
        self.display
    }

    pub fn toggle_expansion(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }

    /// Switching layout also expands, so the change is visible.
    pub fn set_display(&mut self, display: ChildrenDisplay) {
        self.display = display;
        self.expanded = true;
    }

    /// Children are drawn only when expanded and there is something to draw.
    pub fn shows_children(&self, children_len: usize) -> bool {
        self.expanded && children_len > 0
    }
}

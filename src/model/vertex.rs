//! Vertex of a phylogenetic tree.

use crate::model::tree::VertexIndex;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree, i.e. a clade or a taxon.
///
/// A vertex is a *leaf* if it has no children and an *inner vertex* otherwise.
/// It is the *root* if it has no parent.
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `children` are in input order (left to right), each appearing once
/// - `parent` is `None` only for the root
/// - `branch_length` is the distance to the parent; `0.0` if not given.
///   Negative values are not rejected.
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Optional label (leaves typically, inner vertices sometimes)
    label: Option<String>,
    /// Length of the branch to the parent
    branch_length: f64,
    /// Index of the parent vertex; `None` for the root
    parent: Option<VertexIndex>,
    /// Indices of the child vertices, in order
    children: Vec<VertexIndex>,
}

impl Vertex {
    /// Creates a new vertex without parent, children, and branch length.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `label` - Optional label
    pub fn new(index: VertexIndex, label: Option<String>) -> Self {
        Vertex {
            index,
            label,
            branch_length: 0.0,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns whether this vertex has the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    /// Returns the length of the branch to the parent (`0.0` if absent in the input).
    pub fn branch_length(&self) -> f64 {
        self.branch_length
    }

    /// Returns the index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns whether this vertex has a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the indices of the children in order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has at least one child.
    pub fn is_inner(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = Some(label);
    }

    pub(crate) fn set_branch_length(&mut self, branch_length: f64) {
        self.branch_length = branch_length;
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }
}

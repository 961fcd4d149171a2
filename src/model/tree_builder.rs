//! Incremental construction of a [Tree] during parsing.
//!
//! The [TreeBuilder] is driven by the transition automaton of the
//! [NewickParser](crate::newick::NewickParser): each `(` opens a clade,
//! each label atom adds a leaf, and atoms after `)` or `:` annotate the
//! current vertex. The first vertex added becomes the root.
//!
//! # Builder lifecycle
//! ```text
//! new() ──→ add_clade/add_leaf/set_* ──→ finish_tree() ──→ Tree
//! ```

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::Vertex;

/// Default guess for number of vertices, when unknown
pub(crate) const DEFAULT_NUM_VERTICES_GUESS: usize = 16;

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================$=
/// Builds a [Tree] top-down, one vertex at a time.
///
/// New vertices are appended to the arena and, if a parent is given,
/// attached as its last child. Parents therefore always precede their
/// children in the arena and the root is vertex `0`.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    vertices: Vec<Vertex>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NUM_VERTICES_GUESS)
    }

    /// Creates an empty builder with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
        }
    }

    /// Adds an unlabeled vertex that will get children (a clade).
    ///
    /// # Arguments
    /// * `parent` - Parent to attach the new vertex to as last child;
    ///   `None` for the root
    ///
    /// # Returns
    /// The index of the new vertex.
    pub fn add_clade(&mut self, parent: Option<VertexIndex>) -> VertexIndex {
        self.add_vertex(parent, None)
    }

    /// Adds a labeled vertex (typically a leaf).
    ///
    /// # Arguments
    /// * `parent` - Parent to attach the new vertex to as last child;
    ///   `None` for the root (single-vertex trees)
    /// * `label` - Label of the new vertex
    ///
    /// # Returns
    /// The index of the new vertex.
    pub fn add_leaf(&mut self, parent: Option<VertexIndex>, label: String) -> VertexIndex {
        self.add_vertex(parent, Some(label))
    }

    fn add_vertex(&mut self, parent: Option<VertexIndex>, label: Option<String>) -> VertexIndex {
        let index = self.vertices.len();
        let mut vertex = Vertex::new(index, label);
        if let Some(parent) = parent {
            vertex.set_parent(parent);
            self.vertices[parent].push_child(index);
        }
        self.vertices.push(vertex);

        index
    }

    /// Sets the branch length of the vertex at `index`.
    pub fn set_branch_length(&mut self, index: VertexIndex, branch_length: f64) {
        self.vertices[index].set_branch_length(branch_length);
    }

    /// Sets (or replaces) the label of the vertex at `index`.
    pub fn set_label(&mut self, index: VertexIndex, label: String) {
        self.vertices[index].set_label(label);
    }

    /// Returns the parent of the vertex at `index`.
    pub fn parent_of(&self, index: VertexIndex) -> Option<VertexIndex> {
        self.vertices[index].parent()
    }

    /// Returns the number of vertices added so far.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Finalizes the tree, computing its leaf and inner vertex indexes.
    ///
    /// # Returns
    /// The tree rooted at the first added vertex, or `None` if no vertex was added.
    pub fn finish_tree(self) -> Option<Tree> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(Tree::from_arena(self.vertices, 0))
    }
}

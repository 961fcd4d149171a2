//! Provides the tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [Tree] - Main tree structure using the arena pattern,
//!   together with leaf and inner vertex indexes
//! * [VertexIndex] as type used to index vertices in tree
//! * [PostOrderIter] and [PreOrderIter] for stack-based traversals

use crate::model::vertex::Vertex;
use crate::newick;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Children are index lists and the parent an optional index,
/// so there are no ownership cycles, while ascending and descending stay O(1).
///
/// # Structure
/// - All vertices are stored in the arena, the root is vertex `root_index`.
/// - Vertices may have any number of children, in input order.
/// - `leaves`: every vertex without children, in the order a depth-first
///   walk reaches them (left to right).
/// - `inner`: every vertex with children, in postorder
///   (a vertex appears after all its descendants).
///
/// Both indexes are computed exactly once, when the tree is created.
/// Afterwards the tree is immutable; queries (see [crate::clade]) keep
/// their scratch state outside of the tree and only need `&self`.
///
/// # Construction
/// Trees are created by the [NewickParser](crate::newick::NewickParser)
/// through a [TreeBuilder](crate::model::TreeBuilder).
///
/// # Example
/// ```
/// use cladewick::parse_newick_str;
///
/// let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.num_inner(), 2);
/// assert_eq!(tree.lookup("B").unwrap().branch_length(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Leaves in depth-first order
    leaves: Vec<VertexIndex>,

    /// Inner vertices in postorder
    inner: Vec<VertexIndex>,
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl Tree {
    /// Creates a tree from a fully linked arena and builds the leaf and inner
    /// vertex indexes in one (iterative) postorder traversal.
    pub(crate) fn from_arena(vertices: Vec<Vertex>, root_index: VertexIndex) -> Self {
        let mut tree = Tree {
            vertices,
            root_index,
            leaves: Vec::new(),
            inner: Vec::new(),
        };

        let (leaves, inner): (Vec<_>, Vec<_>) = tree
            .post_order_iter()
            .map(Vertex::index)
            .partition(|&index| tree[index].is_leaf());
        tree.leaves = leaves;
        tree.inner = inner;

        tree
    }
}

// ============================================================================
// Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Returns a reference to the root vertex.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the vertex at the given index, or `None` if out of bounds.
    pub fn get(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Returns the parent index of the vertex at `index` (`None` for the root).
    pub fn parent_of(&self, index: VertexIndex) -> Option<VertexIndex> {
        self[index].parent()
    }

    /// Returns the child indices of the vertex at `index`.
    pub fn children_of(&self, index: VertexIndex) -> &[VertexIndex] {
        self[index].children()
    }

    /// Returns the indices of all leaves, in depth-first (left to right) order.
    pub fn leaves(&self) -> &[VertexIndex] {
        &self.leaves
    }

    /// Returns the indices of all inner vertices, in postorder.
    pub fn inner(&self) -> &[VertexIndex] {
        &self.inner
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the number of inner vertices (including an inner root) in this tree.
    pub fn num_inner(&self) -> usize {
        self.inner.len()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns an iterator over the labels of all leaves, in depth-first order.
    /// Unlabeled leaves are skipped.
    pub fn leaf_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.leaves.iter().filter_map(|&index| self[index].label())
    }

    /// Returns the sum of all branch lengths in the tree (root included).
    pub fn total_branch_length(&self) -> f64 {
        self.vertices.iter().map(Vertex::branch_length).sum()
    }

    /// Returns the height of this tree, that is, the largest distance
    /// from the root to any leaf. The root's own branch length is not included.
    pub fn height(&self) -> f64 {
        let mut distances = vec![0.0; self.num_vertices()];
        let mut height: f64 = 0.0;
        for vertex in self.pre_order_iter() {
            if let Some(parent) = vertex.parent() {
                distances[vertex.index()] = distances[parent] + vertex.branch_length();
            }
            if vertex.is_leaf() {
                height = height.max(distances[vertex.index()]);
            }
        }

        height
    }

    /// Convenience method to convert this tree to a Newick string.
    ///
    /// See [newick::to_newick].
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

// ============================================================================
// Lookup (pub)
// ============================================================================
impl Tree {
    /// Returns the first vertex with the given label, scanning the leaves
    /// first and then the inner vertices, or `None` if there is none.
    ///
    /// Labels are not required to be unique; later matches are ignored.
    pub fn lookup(&self, label: &str) -> Option<&Vertex> {
        self.lookup_index(label).map(|index| &self[index])
    }

    /// Returns the index of the first vertex with the given label,
    /// see [Tree::lookup].
    pub fn lookup_index(&self, label: &str) -> Option<VertexIndex> {
        self.find_leaf(label).or_else(|| {
            self.inner
                .iter()
                .copied()
                .find(|&index| self[index].has_label(label))
        })
    }

    /// Returns the index of the first leaf with the given label.
    pub fn find_leaf(&self, label: &str) -> Option<VertexIndex> {
        self.leaves
            .iter()
            .copied()
            .find(|&index| self[index].has_label(label))
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl Tree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is in bounds and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - Every non-root vertex has a parent listing it exactly once as child
    /// - Every child points back to its parent
    /// - All vertices are reachable from the root (single root, acyclic)
    /// - Leaf and inner indexes partition the vertices
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || self.root().has_parent() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self[child].parent() != Some(index) {
                    return false;
                }
            }

            if index != self.root_index {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len() {
                            return false;
                        }
                        let occurrences = self[parent]
                            .children()
                            .iter()
                            .filter(|&&child| child == index)
                            .count();
                        if occurrences != 1 {
                            return false;
                        }
                    }
                }
            }
        }

        // Reachability: a traversal from the root visits every vertex exactly once
        let visited = self.pre_order_iter().take(self.vertices.len() + 1).count();
        if visited != self.vertices.len() {
            return false;
        }

        self.leaves.len() + self.inner.len() == self.vertices.len()
            && self.leaves.iter().all(|&index| self[index].is_leaf())
            && self.inner.iter().all(|&index| self[index].is_inner())
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children, from left to right,
    /// before visiting the vertex itself.
    ///
    /// # Example
    /// ```
    /// use cladewick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B)x,C)y;").unwrap();
    /// let labels: Vec<_> = tree.post_order_iter().filter_map(|v| v.label()).collect();
    /// assert_eq!(labels, vec!["A", "B", "x", "C", "y"]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use cladewick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B)x,C)y;").unwrap();
    /// let labels: Vec<_> = tree.pre_order_iter().filter_map(|v| v.label()).collect();
    /// assert_eq!(labels, vec!["y", "x", "A", "B", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(tree.root_index, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children in reverse, so the leftmost is processed first
            self.stack
                .extend(vertex.children().iter().rev().map(|&child| (child, false)));
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        PreOrderIter {
            tree,
            stack: vec![tree.root_index],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}

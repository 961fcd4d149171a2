//! Subtree extraction: lowest common ancestor (LCA) of a set of leaves.
//!
//! Every target leaf and all its ancestors are marked; then, starting at the
//! root, the walk moves into the single marked child as long as there is
//! exactly one. Where the marked paths diverge (or no child is marked) the
//! walk stops at the subtree root. Marking is O(tree size), the descent
//! O(depth).

use crate::model::{Tree, Vertex, VertexIndex};
use tracing::warn;

// =#========================================================================#=
// MARK SET
// =#========================================================================$=
/// Scratch marks for one vertex each, used by subtree queries.
///
/// Kept outside of the [Tree], so queries do not mutate it.
#[derive(Debug, Clone, Default)]
pub struct MarkSet {
    marks: Vec<bool>,
}

impl MarkSet {
    /// Creates an empty mark set for a tree with `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            marks: vec![false; num_vertices],
        }
    }

    /// Creates an empty mark set fitting the given tree.
    pub fn for_tree(tree: &Tree) -> Self {
        Self::new(tree.num_vertices())
    }

    /// Marks `index`.
    ///
    /// # Returns
    /// `true` if `index` was not marked before
    ///
    /// # Panics
    /// Panics if `index` is out of bounds, unlike [MarkSet::is_marked].
    pub fn mark(&mut self, index: VertexIndex) -> bool {
        !std::mem::replace(&mut self.marks[index], true)
    }

    /// Returns whether `index` is marked.
    pub fn is_marked(&self, index: VertexIndex) -> bool {
        self.marks.get(index).copied().unwrap_or(false)
    }

    /// Returns the number of marked vertices.
    pub fn count(&self) -> usize {
        self.marks.iter().filter(|&&marked| marked).count()
    }

    /// Unmarks all vertices and resizes to `num_vertices`.
    pub fn reset(&mut self, num_vertices: usize) {
        self.marks.clear();
        self.marks.resize(num_vertices, false);
    }
}

// ============================================================================
// Subtree root (pub)
// ============================================================================
impl Tree {
    /// Returns the root of the minimal subtree spanning the leaves with the
    /// given labels, i.e. their lowest common ancestor.
    ///
    /// - For all leaf labels of the tree, this is the root.
    /// - For a single leaf label, this is that leaf.
    /// - If no label matches a leaf, this is the root.
    ///
    /// # Example
    /// ```
    /// use cladewick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
    /// let subroot = tree.subtree_root(&["B", "C"]);
    /// assert_eq!(subroot.branch_length(), 4.0);
    /// ```
    pub fn subtree_root<S: AsRef<str>>(&self, labels: &[S]) -> &Vertex {
        &self[self.subtree_root_index(labels)]
    }

    /// Returns the index of the subtree root, see [Tree::subtree_root].
    pub fn subtree_root_index<S: AsRef<str>>(&self, labels: &[S]) -> VertexIndex {
        let mut marks = MarkSet::for_tree(self);
        self.subtree_root_index_with(labels, &mut marks)
    }

    /// Returns the index of the subtree root, see [Tree::subtree_root],
    /// using (and reusing) the given scratch marks.
    ///
    /// `marks` is reset before the query and is empty again afterwards.
    pub fn subtree_root_index_with<S: AsRef<str>>(
        &self,
        labels: &[S],
        marks: &mut MarkSet,
    ) -> VertexIndex {
        marks.reset(self.num_vertices());
        self.mark_leaves_and_ancestors(labels, marks);
        let subroot = self.descend_marked(marks);
        marks.reset(self.num_vertices());

        subroot
    }

    /// Marks each resolved leaf and its ancestors up to the root.
    fn mark_leaves_and_ancestors<S: AsRef<str>>(&self, labels: &[S], marks: &mut MarkSet) {
        for label in labels {
            let label = label.as_ref();
            let Some(leaf) = self.find_leaf(label) else {
                warn!(label, "no leaf with label, skipping");
                continue;
            };

            let mut current = Some(leaf);
            while let Some(index) = current {
                // Marked before means all its ancestors are marked already
                if !marks.mark(index) {
                    break;
                }
                current = self.parent_of(index);
            }
        }
    }

    /// Descends from the root while exactly one child is marked.
    fn descend_marked(&self, marks: &MarkSet) -> VertexIndex {
        let mut subroot = self.root_index();
        loop {
            let mut marked = self
                .children_of(subroot)
                .iter()
                .copied()
                .filter(|&child| marks.is_marked(child));
            match (marked.next(), marked.next()) {
                (Some(only), None) => subroot = only,
                _ => return subroot,
            }
        }
    }

    /// Returns whether `ancestor` is `index` itself or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: VertexIndex, index: VertexIndex) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if i == ancestor {
                return true;
            }
            current = self.parent_of(i);
        }
        false
    }
}

//! Branch-length aggregation over clades.
//!
//! Two different numbers describe a clade relative to its subtree root:
//! * the mean path length from its tips to the subtree root
//!   ([`Tree::mean_clade_path_length`]), and
//! * the stem length, i.e. the branch length of the subtree root itself,
//!   leading out of the clade to its parent.

use crate::clade::QueryError;
use crate::model::{Tree, VertexIndex};
use tracing::warn;

/// Aggregated branch lengths of a clade, see [Tree::clade_summary].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CladeSummary {
    /// Root of the minimal subtree spanning the clade
    pub root: VertexIndex,
    /// Mean distance from the clade's leaves to `root`
    pub mean_path_length: f64,
    /// Branch length of `root` (distance to its parent)
    pub stem_length: f64,
}

impl Tree {
    /// Returns the summed branch lengths from the vertex at `index` up to,
    /// but excluding, `subroot`; `0.0` if both coincide.
    ///
    /// # Returns
    /// `None` if `subroot` is not an ancestor of `index`.
    pub fn path_length_to(&self, index: VertexIndex, subroot: VertexIndex) -> Option<f64> {
        let mut length = 0.0;
        let mut current = index;
        while current != subroot {
            length += self[current].branch_length();
            current = self.parent_of(current)?;
        }

        Some(length)
    }

    /// Returns the mean path length from the leaves with the given labels
    /// to `subroot`.
    ///
    /// For each leaf, branch lengths of the leaf and of all its ancestors
    /// strictly below `subroot` are summed; the result is the arithmetic
    /// mean of these sums. Labels without matching leaf are skipped.
    ///
    /// # Errors
    /// * [QueryError::EmptyClade] if no label matches a leaf
    /// * [QueryError::NotInClade] if a leaf is not a descendant of `subroot`
    ///
    /// # Example
    /// ```
    /// use cladewick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
    /// let subroot = tree.subtree_root_index(&["B", "C"]);
    /// assert_eq!(tree.mean_clade_path_length(&["B", "C"], subroot), Ok(2.5));
    /// ```
    pub fn mean_clade_path_length<S: AsRef<str>>(
        &self,
        labels: &[S],
        subroot: VertexIndex,
    ) -> Result<f64, QueryError> {
        let mut total = 0.0;
        let mut count = 0usize;
        for label in labels {
            let label = label.as_ref();
            let Some(leaf) = self.find_leaf(label) else {
                warn!(label, "no leaf with label, skipping");
                continue;
            };
            total += self
                .path_length_to(leaf, subroot)
                .ok_or_else(|| QueryError::NotInClade {
                    label: label.to_string(),
                })?;
            count += 1;
        }

        if count == 0 {
            return Err(QueryError::EmptyClade);
        }
        Ok(total / count as f64)
    }

    /// Computes subtree root, mean path length and stem length of the clade
    /// spanned by the leaves with the given labels.
    ///
    /// # Errors
    /// [QueryError::EmptyClade] if no label matches a leaf.
    ///
    /// # Example
    /// ```
    /// use cladewick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
    /// let summary = tree.clade_summary(&["B", "C"]).unwrap();
    /// assert_eq!(summary.mean_path_length, 2.5);
    /// assert_eq!(summary.stem_length, 4.0);
    /// ```
    pub fn clade_summary<S: AsRef<str>>(&self, labels: &[S]) -> Result<CladeSummary, QueryError> {
        let root = self.subtree_root_index(labels);
        let mean_path_length = self.mean_clade_path_length(labels, root)?;

        Ok(CladeSummary {
            root,
            mean_path_length,
            stem_length: self[root].branch_length(),
        })
    }

    /// Returns the branch length of the first vertex with the given label
    /// (see [Tree::lookup]), or `None` if there is none.
    pub fn tip_branch_length(&self, label: &str) -> Option<f64> {
        self.lookup(label).map(|vertex| vertex.branch_length())
    }
}

//! Clade queries on parsed trees.
//!
//! * [subtree] - lowest common ancestor of a set of leaves
//!   ([`Tree::subtree_root`](crate::model::Tree::subtree_root)), computed by
//!   marking ancestors in a [MarkSet] and descending from the root
//! * [branch_lengths] - branch-length aggregation relative to such a
//!   subtree root ([`Tree::clade_summary`](crate::model::Tree::clade_summary))
//!
//! Target leaves are resolved by label, taking the first leaf with that label.
//! Labels without matching leaf are skipped.
//!
//! # Concurrency
//! Queries take `&self`; all scratch state lives in a [MarkSet] owned by the
//! call (or handed in by the caller), so a tree may be queried from several
//! threads at once. A single [MarkSet] must not be shared between concurrent
//! queries.

pub mod branch_lengths;
pub mod subtree;

pub use branch_lengths::CladeSummary;
pub use subtree::MarkSet;

use thiserror::Error;

/// Error of a clade query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// None of the given labels matches a leaf.
    #[error("no leaf of the clade found in tree")]
    EmptyClade,
    /// The leaf is not a descendant of the given subtree root.
    #[error("leaf {label:?} is not part of the clade")]
    NotInClade { label: String },
}

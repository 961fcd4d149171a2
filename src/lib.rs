//! Cladewick is a library to parse phylogenetic trees from Newick strings
//! and to query clades of these trees.
//!
//! Core functionality provided:
//! - Newick: Parse single Newick strings or files with one tree per line,
//!   and write trees back (see [crate::newick]).
//!   Parsing runs a single finite-state automaton over the tokens that both
//!   validates the input and builds the tree.
//! - Tree model: [Tree] uses the arena pattern, so vertices only store
//!   indices of their parent and children (see [crate::model]).
//!   Vertices may have any number of children, a label, and a branch length.
//! - Lookup: find vertices by label ([`Tree::lookup`]).
//! - Clades (see [crate::clade]):
//!   - Subtree root (lowest common ancestor) of a set of leaves
//!     ([`Tree::subtree_root`])
//!   - Mean tip-to-subtree-root path length and stem length of a clade
//!     ([`Tree::clade_summary`])
//! - Clade definitions from TOML (see [crate::config]).
//!
//! Limitations:
//! - Labels need not be unique; lookups return the first match
//! - Newick extensions (comments, NHX, annotations) are not supported
//!
//! # Example
//!
//! ```
//! use cladewick::parse_newick_str;
//!
//! let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
//! assert_eq!(tree.num_leaves(), 3);
//! assert_eq!(tree.num_inner(), 2);
//!
//! let summary = tree.clade_summary(&["B", "C"]).unwrap();
//! assert_eq!(summary.stem_length, 4.0);
//! assert_eq!(summary.mean_path_length, 2.5);
//! ```
//!
//! # Concurrency
//! A [Tree] is immutable after parsing and all queries take `&self`,
//! so trees can be shared between threads freely.

pub mod clade;
pub mod config;
pub mod model;
pub mod newick;
pub mod parser;

pub use crate::clade::{CladeSummary, QueryError};
pub use crate::model::{Tree, Vertex, VertexIndex};
pub use crate::parser::ParsingError;

use std::path::Path;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file containing one Newick string per line
/// using default settings, returning all trees.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}

//! Data model for phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. A vertex may have any number
//! of children; parent links are plain indices. Besides the arena, a tree
//! keeps two derived indexes computed once at construction:
//!
//! | Index | Content | Order |
//! |-------|---------|-------|
//! | [`Tree::leaves`] | vertices without children | depth-first, left to right |
//! | [`Tree::inner`] | vertices with children | postorder |
//!
//! # Building trees
//! Trees are constructed during parsing via the [TreeBuilder].

pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use tree::{PostOrderIter, PreOrderIter, Tree, VertexIndex};
pub use tree_builder::TreeBuilder;
pub use vertex::Vertex;

//! Lowest common ancestor queries over two data models.
//!
//! Provides an unbalanced binary search tree ([`tree::OrderedTree`]), an adjacency-list
//! graph with depth-first path enumeration ([`graph::PathGraph`]), the LCA query drivers
//! ([`lca`]), and JSON fixture loading for both structures.

pub mod config;
pub mod error;
pub mod fixture;
pub mod graph;
pub mod key;
pub mod lca;
pub mod tree;

pub use error::{AncestryError, Result};
pub use graph::PathGraph;
pub use key::{Comparable, Key, KeyKind};
pub use tree::OrderedTree;

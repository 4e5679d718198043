//! # Skein
//!
//! Skein is a small Rust library of classical graph algorithms over
//! adjacency-list graphs:
//!
//! - depth-first traversal, recursive and iterative ([`graph::traversal`]),
//! - union–find with path compression and union by rank ([`union_find`]),
//! - minimum spanning forests with Kruskal's algorithm ([`spanning_tree`]),
//! - topological sorting with Kahn's algorithm and with a depth-first
//!   postorder ([`topological_order`]).
//!
//! Nodes are any `Clone + Eq + Hash` type. Every operation is synchronous and
//! either returns a value or a typed error; the library only logs through
//! [`tracing`] and never installs a subscriber.

pub mod graph;
pub mod num_traits;
pub mod spanning_tree;
pub mod topological_order;
pub mod union_find;

pub use graph::AdjacencyGraph;
pub use spanning_tree::{kruskal, kruskal_keyed, Edge, SpanningForest};
pub use topological_order::TopoError;
pub use union_find::{DisjointSet, KeyedDisjointSet, UnionFindError};

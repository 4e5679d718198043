//! # Adjacency-List Graphs
//!
//! [`AdjacencyGraph`] is a directed graph stored as a mapping from each node
//! to the ordered list of its successors. It is the input shape shared by the
//! depth-first traversals in [`traversal`] and the topological sorts in
//! [`crate::topological_order`].
//!
//! ## Ordering
//!
//! Both the order in which nodes were first declared as sources and the order
//! of each successor list are insertion order. Traversals visit successors in
//! list order, so building the same graph the same way always yields the same
//! visitation order.
//!
//! ## Undeclared nodes
//!
//! A node that only ever appears as the *target* of an edge has no entry of its
//! own. It is still a node of the graph: [`AdjacencyGraph::neighbors`] reports
//! an empty successor list for it and [`AdjacencyGraph::node_universe`]
//! includes it.
//!
//! Undirected graphs are expressed by inserting both `(u, v)` and `(v, u)`.

use std::hash::Hash;

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

pub mod traversal;

/// The raw adjacency mapping wrapped by [`AdjacencyGraph`].
pub type AdjacencyMap<N> = IndexMap<N, Vec<N>, RandomState>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyGraph<N: Hash + Eq> {
    adj: AdjacencyMap<N>,
}

impl<N: Hash + Eq> Default for AdjacencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Hash + Eq> AdjacencyGraph<N> {
    pub fn new() -> Self {
        AdjacencyGraph {
            adj: AdjacencyMap::default(),
        }
    }

    /// Builds a graph from `(node, successors)` pairs, the way one would
    /// write down an adjacency list by hand. A node listed twice gets the
    /// concatenation of both successor lists.
    pub fn from_adjacency<I, S>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        S: IntoIterator<Item = N>,
    {
        let mut graph = Self::new();
        for (u, successors) in adjacency {
            graph.adj.entry(u).or_default().extend(successors);
        }
        graph
    }

    /// Declares `u` as a node with its own (possibly empty) successor list.
    ///
    /// Returns `true` if `u` was not declared before.
    pub fn add_node(&mut self, u: N) -> bool {
        if self.adj.contains_key(&u) {
            return false;
        }
        self.adj.insert(u, Vec::new());
        true
    }

    /// Appends `v` to the successors of `u`, declaring `u` if needed.
    ///
    /// `v` is not declared. Parallel edges are kept: adding the same edge
    /// twice makes `v` appear twice in `u`'s successor list.
    pub fn add_edge(&mut self, u: N, v: N) {
        self.adj.entry(u).or_default().push(v);
    }

    /// The successors of `u` in insertion order, empty for undeclared nodes.
    pub fn neighbors(&self, u: &N) -> &[N] {
        self.adj.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `u` has its own entry (was a source of an edge or added with
    /// [`AdjacencyGraph::add_node`]).
    pub fn is_declared(&self, u: &N) -> bool {
        self.adj.contains_key(u)
    }

    /// Declared nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adj.keys()
    }

    /// Every node of the graph: declared nodes first, then nodes that only
    /// appear as successors, in the order they were first seen.
    pub fn node_universe(&self) -> IndexSet<&N, RandomState> {
        let mut universe: IndexSet<&N, RandomState> = self.adj.keys().collect();
        universe.extend(self.adj.values().flatten());
        universe
    }

    /// Number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// All edges `(u, v)`, grouped by source in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.adj
            .iter()
            .flat_map(|(u, successors)| successors.iter().map(move |v| (u, v)))
    }

    pub fn as_map(&self) -> &AdjacencyMap<N> {
        &self.adj
    }
}

impl<N: Hash + Eq> From<AdjacencyMap<N>> for AdjacencyGraph<N> {
    fn from(adj: AdjacencyMap<N>) -> Self {
        AdjacencyGraph { adj }
    }
}

impl<N: Hash + Eq> FromIterator<(N, N)> for AdjacencyGraph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<N: Hash + Eq> Extend<(N, N)> for AdjacencyGraph<N> {
    fn extend<I: IntoIterator<Item = (N, N)>>(&mut self, iter: I) {
        for (u, v) in iter {
            self.add_edge(u, v);
        }
    }
}

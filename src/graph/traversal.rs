//! # Depth-First Traversal
//!
//! Two forms of pre-order depth-first search over an [`AdjacencyGraph`]:
//!
//! - [`AdjacencyGraph::dfs_recursive`] descends on the call stack, threading an
//!   explicit [`DfsState`] through the recursion.
//! - [`AdjacencyGraph::dfs_iterative`] (and the lazy [`DfsIter`] behind it)
//!   keeps its own stack on the heap.
//!
//! Both produce the **same** visitation order for the same graph and start
//! node: a node is emitted and marked visited the first time it is reached,
//! and successors are explored in successor-list order.
//!
//! The explicit stack holds one frame per node on the current path, each frame
//! being a cursor into that node's successor list. Popping a frame is the
//! iterative equivalent of returning from a recursive call. Pushing all
//! unvisited successors up front (in reverse) would not reproduce the
//! recursive order: with `A -> [B, C]`, `B -> [E, F]`, `E -> [C]`, recursion
//! visits `A B E C F` whereas eager pushing visits `A B E F C`.
//!
//! Cycles need no special handling; the visited set stops re-entry.

use std::{hash::Hash, slice};

use ahash::AHashSet;

use super::AdjacencyGraph;

/// The visited set and visitation order of a depth-first search in progress.
///
/// Passing the same state to several calls of
/// [`AdjacencyGraph::dfs_recursive_from`] continues one traversal from a new
/// root without revisiting anything already seen.
#[derive(Clone, Debug)]
pub struct DfsState<N> {
    visited: AHashSet<N>,
    order: Vec<N>,
}

impl<N> Default for DfsState<N> {
    fn default() -> Self {
        DfsState {
            visited: AHashSet::new(),
            order: Vec::new(),
        }
    }
}

impl<N: Hash + Eq + Clone> DfsState<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    /// Nodes in the order they were visited so far.
    pub fn order(&self) -> &[N] {
        &self.order
    }

    pub fn into_order(self) -> Vec<N> {
        self.order
    }

    fn visit(&mut self, node: &N) {
        self.visited.insert(node.clone());
        self.order.push(node.clone());
    }
}

impl<N: Hash + Eq + Clone> AdjacencyGraph<N> {
    /// Recursive pre-order DFS from `start`.
    ///
    /// `start` does not have to be declared; an undeclared start yields
    /// `[start]`.
    ///
    /// # Panics
    ///
    /// Recursion depth equals the length of the longest simple path explored
    /// from `start`. Deep graphs (long chains) can overflow the thread's
    /// stack, which aborts the process. Use [`AdjacencyGraph::dfs_iterative`]
    /// for inputs of unbounded depth.
    pub fn dfs_recursive(&self, start: &N) -> Vec<N> {
        let mut state = DfsState::new();
        self.dfs_recursive_from(&mut state, start);
        state.into_order()
    }

    /// Continues a recursive DFS from `start` using an existing `state`.
    ///
    /// Does nothing if `start` was already visited.
    pub fn dfs_recursive_from(&self, state: &mut DfsState<N>, start: &N) {
        if state.is_visited(start) {
            return;
        }
        state.visit(start);
        for neighbor in self.neighbors(start) {
            if !state.is_visited(neighbor) {
                self.dfs_recursive_from(state, neighbor);
            }
        }
    }

    /// Iterative pre-order DFS from `start`, with the same order as
    /// [`AdjacencyGraph::dfs_recursive`].
    pub fn dfs_iterative(&self, start: &N) -> Vec<N> {
        self.dfs_iter(start).cloned().collect()
    }

    /// Lazy iterative DFS from `start`.
    pub fn dfs_iter<'a>(&'a self, start: &'a N) -> DfsIter<'a, N> {
        let mut iter = DfsIter::new(self);
        iter.restart(start);
        iter
    }

    /// Visits every node of the graph exactly once, starting a new DFS tree
    /// from each declared node (in declaration order) that has not been
    /// reached yet.
    pub fn dfs_forest(&self) -> Vec<N> {
        let mut iter = DfsIter::new(self);
        let mut order = Vec::new();
        for root in self.nodes() {
            if iter.restart(root) {
                order.extend(iter.by_ref().cloned());
            }
        }
        order
    }
}

/// A pre-order DFS iterator over an [`AdjacencyGraph`].
pub struct DfsIter<'a, N: Hash + Eq> {
    graph: &'a AdjacencyGraph<N>,
    visited: AHashSet<&'a N>,
    /// A root that has been marked but not yet emitted.
    pending: Option<&'a N>,
    /// One successor cursor per node on the current path.
    stack: Vec<slice::Iter<'a, N>>,
}

impl<'a, N: Hash + Eq> DfsIter<'a, N> {
    fn new(graph: &'a AdjacencyGraph<N>) -> Self {
        DfsIter {
            graph,
            visited: AHashSet::new(),
            pending: None,
            stack: Vec::new(),
        }
    }

    /// Queues `start` as the next root if it has not been visited.
    ///
    /// Only meaningful once the iterator is exhausted; returns whether a new
    /// root was queued.
    pub fn restart(&mut self, start: &'a N) -> bool {
        if !self.visited.insert(start) {
            return false;
        }
        self.pending = Some(start);
        true
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    fn enter(&mut self, node: &'a N) -> &'a N {
        self.stack.push(self.graph.neighbors(node).iter());
        node
    }
}

impl<'a, N: Hash + Eq> Iterator for DfsIter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.pending.take() {
            return Some(self.enter(root));
        }

        loop {
            let cursor = self.stack.last_mut()?;
            let visited = &self.visited;
            match cursor.find(|n| !visited.contains(n)) {
                Some(next) => {
                    self.visited.insert(next);
                    return Some(self.enter(next));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::graph::AdjacencyGraph;
    use itertools::Itertools;
    use proptest::prelude::*;
    use similar_asserts::assert_eq;

    fn letters() -> AdjacencyGraph<&'static str> {
        [
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("B", "E"),
            ("C", "F"),
            ("E", "F"),
            ("F", "G"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn letters_visit_order() {
        let graph = letters();

        let order = graph.dfs_recursive(&"A");
        insta::assert_debug_snapshot!(order, @r#"
        [
            "A",
            "B",
            "D",
            "E",
            "F",
            "G",
            "C",
        ]
        "#);
        assert_eq!(graph.dfs_iterative(&"A"), order);
    }

    #[test]
    fn late_reached_sibling_keeps_recursive_order() {
        let graph: AdjacencyGraph<char> =
            [('A', 'B'), ('A', 'C'), ('B', 'E'), ('B', 'F'), ('E', 'C')]
                .into_iter()
                .collect();

        let expected = vec!['A', 'B', 'E', 'C', 'F'];
        assert_eq!(graph.dfs_recursive(&'A'), expected);
        assert_eq!(graph.dfs_iterative(&'A'), expected);
    }

    #[test]
    fn undeclared_start_is_a_singleton() {
        let graph = letters();

        assert_eq!(graph.dfs_recursive(&"Z"), vec!["Z"]);
        assert_eq!(graph.dfs_iterative(&"Z"), vec!["Z"]);
        assert_eq!(graph.dfs_iterative(&"G"), vec!["G"]);
    }

    #[test]
    fn cycles_terminate() {
        let graph: AdjacencyGraph<u8> = [(0, 1), (1, 2), (2, 0), (2, 2), (1, 0)]
            .into_iter()
            .collect();

        assert_eq!(graph.dfs_recursive(&1), vec![1, 2, 0]);
        assert_eq!(graph.dfs_iterative(&1), vec![1, 2, 0]);
    }

    #[test]
    fn forest_covers_every_node_once() {
        let mut graph = letters();
        graph.add_edge("X", "Y");
        graph.add_edge("Y", "C");

        let order = graph.dfs_forest();
        assert_eq!(order, vec!["A", "B", "D", "E", "F", "G", "C", "X", "Y"]);
        assert_eq!(order.len(), graph.node_universe().len());
    }

    #[test]
    fn shared_state_continues_traversal() {
        let graph = letters();
        let mut state = super::DfsState::new();

        graph.dfs_recursive_from(&mut state, &"C");
        graph.dfs_recursive_from(&mut state, &"A");
        graph.dfs_recursive_from(&mut state, &"F");

        assert_eq!(state.order(), &["C", "F", "G", "A", "B", "D", "E"]);
    }

    #[test]
    fn deep_chain_iterates_without_recursion() {
        let graph: AdjacencyGraph<u32> = (0..200_000).map(|i| (i, i + 1)).collect();

        let order = graph.dfs_iterative(&0);
        assert_eq!(order.len(), 200_001);
        assert_eq!(order.last(), Some(&200_000));
    }

    fn arbitrary_graph() -> impl Strategy<Value = AdjacencyGraph<u8>> {
        proptest::collection::vec((0u8..12, 0u8..12), 0..40)
            .prop_map(|edges| edges.into_iter().collect())
    }

    proptest! {
        #[test]
        fn recursive_and_iterative_agree(graph in arbitrary_graph(), start in 0u8..12) {
            prop_assert_eq!(graph.dfs_recursive(&start), graph.dfs_iterative(&start));
        }

        #[test]
        fn order_is_unique_and_reachable(graph in arbitrary_graph(), start in 0u8..12) {
            let order = graph.dfs_iterative(&start);

            prop_assert_eq!(order.first(), Some(&start));
            prop_assert!(order.iter().all_unique());

            // every node after the first has a predecessor earlier in the order
            for (i, node) in order.iter().enumerate().skip(1) {
                prop_assert!(order[..i].iter().any(|u| graph.neighbors(u).contains(node)));
            }
        }
    }
}

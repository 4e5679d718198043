//! # Topological Sorting
//!
//! Two independent strategies over an [`AdjacencyGraph`]:
//!
//! - [`AdjacencyGraph::topo_sort_kahn`]: in-degree counting with a FIFO
//!   worklist.
//! - [`AdjacencyGraph::topo_sort_dfs`]: reversed depth-first postorder with
//!   temporary marks for cycle detection.
//!
//! Both sort the whole node universe: declared nodes *and* nodes that only
//! appear as successors. On acyclic input each returns some order in which
//! every edge `u -> v` has `u` before `v`; the two orders need not agree.
//! On cyclic input each returns an error, never a partial order.

use std::{collections::VecDeque, fmt::Debug, hash::Hash, slice};

use ahash::{AHashSet, RandomState};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::AdjacencyGraph;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError<N> {
    #[error("Not a DAG: {nodes_processed} nodes processed out of {total_nodes} total nodes. Remaining nodes with non-zero in-degrees: {remaining:?}")]
    NotDag {
        nodes_processed: usize,
        total_nodes: usize,
        remaining: Vec<(N, usize)>,
    },
    #[error("Cycle detected at node {node:?}: {cycle:?}")]
    CycleDetected { node: N, cycle: Vec<N> },
}

impl<N> TopoError<N> {
    /// The nodes implicated in the failure: the unresolved nodes for Kahn's
    /// algorithm, the detected cycle for the depth-first sort.
    pub fn cycle_nodes(&self) -> Vec<&N> {
        match self {
            TopoError::NotDag { remaining, .. } => remaining.iter().map(|(n, _)| n).collect(),
            TopoError::CycleDetected { cycle, .. } => cycle.iter().collect(),
        }
    }
}

impl<N: Hash + Eq + Clone + Debug> AdjacencyGraph<N> {
    /// Kahn's algorithm.
    ///
    /// Nodes enter the in-degree table the first time they are touched (each
    /// declared node, then its successors), and the worklist is seeded with
    /// the zero in-degree nodes in table order.
    pub fn topo_sort_kahn(&self) -> Result<Vec<N>, TopoError<N>> {
        let mut indeg: IndexMap<&N, usize, RandomState> = IndexMap::default();
        for (u, successors) in self.as_map() {
            indeg.entry(u).or_insert(0);
            for v in successors {
                *indeg.entry(v).or_insert(0) += 1;
            }
        }

        let mut q: VecDeque<&N> = indeg
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(n, _)| *n)
            .collect();

        let mut order = Vec::with_capacity(indeg.len());
        while let Some(u) = q.pop_front() {
            order.push(u.clone());
            for v in self.neighbors(u) {
                let Some(d) = indeg.get_mut(v) else {
                    continue;
                };
                *d -= 1;
                if *d == 0 {
                    q.push_back(v);
                }
            }
        }

        if order.len() != indeg.len() {
            let remaining: Vec<(N, usize)> = indeg
                .iter()
                .filter_map(|(node, &degree)| {
                    if degree > 0 {
                        Some(((*node).clone(), degree))
                    } else {
                        None
                    }
                })
                .collect();
            warn!(
                processed = order.len(),
                total = indeg.len(),
                unresolved = remaining.len(),
                "kahn: graph has a cycle"
            );

            return Err(TopoError::NotDag {
                nodes_processed: order.len(),
                total_nodes: indeg.len(),
                remaining,
            });
        }
        debug!(nodes = order.len(), "kahn: sorted");
        Ok(order)
    }

    /// Depth-first topological sort.
    ///
    /// Declared nodes are used as roots in declaration order. A node is
    /// emitted after all of its successors have been emitted; the emission
    /// order reversed is the result. Reaching a node that is still on the
    /// active path is a cycle.
    ///
    /// The active path lives on an explicit stack, so arbitrarily long chains
    /// do not recurse.
    pub fn topo_sort_dfs(&self) -> Result<Vec<N>, TopoError<N>> {
        let mut visited: AHashSet<&N> = AHashSet::new();
        let mut on_path: AHashSet<&N> = AHashSet::new();
        let mut path: Vec<(&N, slice::Iter<'_, N>)> = Vec::new();
        let mut postorder = Vec::new();

        for root in self.nodes() {
            if visited.contains(root) {
                continue;
            }
            on_path.insert(root);
            path.push((root, self.neighbors(root).iter()));

            while let Some((node, successors)) = path.last_mut() {
                let node = *node;
                match successors.next() {
                    Some(next) if on_path.contains(next) => {
                        let start = path.iter().position(|(n, _)| *n == next).unwrap_or(0);
                        let cycle: Vec<N> =
                            path[start..].iter().map(|(n, _)| (*n).clone()).collect();
                        warn!(node = ?next, ?cycle, "dfs: graph has a cycle");
                        return Err(TopoError::CycleDetected {
                            node: next.clone(),
                            cycle,
                        });
                    }
                    Some(next) => {
                        if !visited.contains(next) {
                            on_path.insert(next);
                            path.push((next, self.neighbors(next).iter()));
                        }
                    }
                    None => {
                        path.pop();
                        on_path.remove(node);
                        visited.insert(node);
                        postorder.push(node.clone());
                    }
                }
            }
        }

        postorder.reverse();
        debug!(nodes = postorder.len(), "dfs: sorted");
        Ok(postorder)
    }
}

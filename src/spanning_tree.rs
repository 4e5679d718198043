//! # Minimum Spanning Forests (Kruskal)
//!
//! [`kruskal`] sorts the edges by ascending weight and greedily accepts every
//! edge that joins two different components, tracked with a
//! [`DisjointSet`]. The sort is stable, so among edges of equal weight the one
//! given first wins.
//!
//! The result is a minimum spanning *forest*: for a disconnected input fewer
//! than `n - 1` edges are accepted. No error is raised for that case; compare
//! with [`SpanningForest::is_spanning_tree`].

use std::{convert::Infallible, hash::Hash};

use tracing::{debug, trace};

use crate::{
    num_traits::Weight,
    union_find::{DisjointSet, KeyedDisjointSet, UnionFindError},
};

/// An undirected weighted edge between `u` and `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<V, W> {
    pub u: V,
    pub v: V,
    pub weight: W,
}

impl<V, W> Edge<V, W> {
    pub fn new(u: V, v: V, weight: W) -> Self {
        Edge { u, v, weight }
    }
}

impl<V, W> From<(V, V, W)> for Edge<V, W> {
    fn from((u, v, weight): (V, V, W)) -> Self {
        Edge { u, v, weight }
    }
}

/// The edges selected by [`kruskal`], in the order they were accepted, and
/// their summed weight.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest<V, W> {
    pub edges: Vec<Edge<V, W>>,
    pub total_weight: W,
}

impl<V, W: Weight> SpanningForest<V, W> {
    fn empty() -> Self {
        SpanningForest {
            edges: Vec::new(),
            total_weight: W::zero(),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the forest is a single tree over `n_vertices` vertices.
    pub fn is_spanning_tree(&self, n_vertices: usize) -> bool {
        match n_vertices.checked_sub(1) {
            Some(target) => self.edges.len() == target,
            None => self.edges.is_empty(),
        }
    }

    /// Number of trees in the forest when it spans `n_vertices` vertices.
    pub fn components(&self, n_vertices: usize) -> usize {
        n_vertices.saturating_sub(self.edges.len())
    }
}

/// The greedy selection shared by [`kruskal`] and [`kruskal_keyed`].
///
/// `join` merges the components of an edge's endpoints and reports whether
/// they were different. Selection stops once `target` edges are accepted.
fn select<V, W, E>(
    edges: &[Edge<V, W>],
    target: Option<usize>,
    mut join: impl FnMut(&Edge<V, W>) -> Result<bool, E>,
) -> Result<SpanningForest<V, W>, E>
where
    V: Clone,
    W: Weight,
{
    let mut sorted: Vec<&Edge<V, W>> = edges.iter().collect();
    sorted.sort_by(|a, b| a.weight.cmp_weight(&b.weight));

    let mut forest: SpanningForest<V, W> = SpanningForest::empty();
    let mut examined = 0;
    for edge in sorted {
        examined += 1;
        if !join(edge)? {
            trace!(weight = ?edge.weight, "edge closes a cycle, skipped");
            continue;
        }
        trace!(weight = ?edge.weight, "edge accepted");
        forest.total_weight = forest.total_weight.saturating_add_weight(edge.weight);
        forest.edges.push(edge.clone());
        if Some(forest.edges.len()) == target {
            break;
        }
    }

    debug!(
        accepted = forest.edges.len(),
        examined,
        total = edges.len(),
        "kruskal finished"
    );
    Ok(forest)
}

/// Kruskal's algorithm over vertices `0..n_vertices`.
///
/// Returns [`UnionFindError::IndexOutOfRange`] if an edge has an endpoint
/// outside `0..n_vertices`. An out-of-range endpoint is only noticed when its
/// edge is examined; an early stop can skip it.
///
/// With integer weights the total saturates at the weight type's bounds.
/// The selected edges are unaffected.
pub fn kruskal<W: Weight>(
    n_vertices: usize,
    edges: &[Edge<usize, W>],
) -> Result<SpanningForest<usize, W>, UnionFindError> {
    let mut components = DisjointSet::new(n_vertices);
    select(edges, n_vertices.checked_sub(1), |edge| {
        components.union(edge.u, edge.v)
    })
}

/// Kruskal's algorithm over arbitrary vertex identifiers.
///
/// The vertices are the endpoints of `edges`.
pub fn kruskal_keyed<V, W>(edges: &[Edge<V, W>]) -> SpanningForest<V, W>
where
    V: Clone + Hash + Eq,
    W: Weight,
{
    let mut components = KeyedDisjointSet::new();
    for edge in edges {
        components.insert(edge.u.clone());
        components.insert(edge.v.clone());
    }

    let target = components.len().checked_sub(1);
    let result = select(edges, target, |edge| {
        Ok::<_, Infallible>(components.union_or_insert(edge.u.clone(), edge.v.clone()))
    });
    match result {
        Ok(forest) => forest,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod test {
    use super::{kruskal, kruskal_keyed, Edge};
    use crate::union_find::UnionFindError;
    use proptest::prelude::*;

    fn edges<W>(list: &[(usize, usize, W)]) -> Vec<Edge<usize, W>>
    where
        W: Copy,
    {
        list.iter().copied().map(Edge::from).collect()
    }

    #[test]
    fn four_vertex_example() {
        let input = edges(&[(0, 1, 10), (0, 2, 6), (0, 3, 5), (1, 3, 15), (2, 3, 4)]);

        let mst = kruskal(4, &input).unwrap();

        assert_eq!(mst.edges, edges(&[(2, 3, 4), (0, 3, 5), (0, 1, 10)]));
        assert_eq!(mst.total_weight, 19);
        assert!(mst.is_spanning_tree(4));
    }

    #[test]
    fn float_weights() {
        let input = edges(&[(0, 1, 2.5), (1, 2, 0.5), (0, 2, 1.0)]);

        let mst = kruskal(3, &input).unwrap();

        assert_eq!(mst.edges, edges(&[(1, 2, 0.5), (0, 2, 1.0)]));
        assert_eq!(mst.total_weight, 1.5);
    }

    #[test]
    fn equal_weights_prefer_earlier_edges() {
        let triangle = edges(&[(0, 1, 1), (1, 2, 1), (0, 2, 1)]);
        let mst = kruskal(3, &triangle).unwrap();
        assert_eq!(mst.edges, edges(&[(0, 1, 1), (1, 2, 1)]));

        let reversed: Vec<_> = triangle.iter().rev().copied().collect();
        let mst = kruskal(3, &reversed).unwrap();
        assert_eq!(mst.edges, edges(&[(0, 2, 1), (1, 2, 1)]));
    }

    #[test]
    fn disconnected_input_gives_a_forest() {
        let input = edges(&[(0, 1, 3), (2, 3, 1), (3, 4, 2), (2, 4, 7)]);

        let forest = kruskal(6, &input).unwrap();

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.total_weight, 6);
        assert!(!forest.is_spanning_tree(6));
        assert_eq!(forest.components(6), 3);
    }

    #[test]
    fn degenerate_vertex_counts() {
        let empty: Vec<Edge<usize, u32>> = Vec::new();
        let forest = kruskal(0, &empty).unwrap();
        assert!(forest.is_empty());
        assert!(forest.is_spanning_tree(0));

        let forest = kruskal(1, &edges(&[(0, 0, 5u32)])).unwrap();
        assert!(forest.is_empty());
        assert!(forest.is_spanning_tree(1));
    }

    #[test]
    fn out_of_range_endpoint() {
        let input = edges(&[(0, 1, 1), (1, 4, 2)]);

        assert_eq!(
            kruskal(3, &input),
            Err(UnionFindError::IndexOutOfRange { index: 4, len: 3 })
        );
    }

    #[test]
    fn total_weight_saturates() {
        let input = edges(&[(0, 1, 200u8), (1, 2, 100), (2, 3, u8::MAX)]);

        let mst = kruskal(4, &input).unwrap();

        assert_eq!(mst.len(), 3);
        assert_eq!(mst.total_weight, u8::MAX);

        let input = edges(&[(0, 1, i8::MIN), (1, 2, -1)]);
        assert_eq!(kruskal(3, &input).unwrap().total_weight, i8::MIN);
    }

    #[test]
    fn keyed_vertices() {
        let input: Vec<Edge<&str, f64>> = vec![
            ("a", "b", 10.0).into(),
            ("a", "c", 6.0).into(),
            ("a", "d", 5.0).into(),
            ("b", "d", 15.0).into(),
            ("c", "d", 4.0).into(),
        ];

        let mst = kruskal_keyed(&input);

        assert_eq!(
            mst.edges,
            vec![
                Edge::new("c", "d", 4.0),
                Edge::new("a", "d", 5.0),
                Edge::new("a", "b", 10.0)
            ]
        );
        assert_eq!(mst.total_weight, 19.0);
        assert!(mst.is_spanning_tree(4));
    }

    fn weighted_edges() -> impl Strategy<Value = (usize, Vec<Edge<usize, u32>>)> {
        (1usize..16).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((0..n, 0..n, 0u32..20).prop_map(Edge::from), 0..50),
            )
        })
    }

    proptest! {
        #[test]
        fn total_weight_matches_edges((n, input) in weighted_edges()) {
            let forest = kruskal(n, &input).unwrap();

            prop_assert_eq!(
                forest.total_weight,
                forest.edges.iter().map(|e| e.weight).sum::<u32>()
            );
            prop_assert!(forest.len() < n);
        }

        #[test]
        fn connected_input_spans((n, input) in weighted_edges()) {
            // a path through every vertex guarantees connectivity
            let mut connected = input.clone();
            connected.extend((1..n).map(|v| Edge::new(v - 1, v, 100)));

            let forest = kruskal(n, &connected).unwrap();

            prop_assert!(forest.is_spanning_tree(n));
            prop_assert_eq!(forest.components(n), 1);
        }

        #[test]
        fn keyed_matches_indexed((n, input) in weighted_edges()) {
            let indexed = kruskal(n, &input).unwrap();
            let keyed = kruskal_keyed(&input);

            prop_assert_eq!(indexed.total_weight, keyed.total_weight);
            prop_assert_eq!(indexed.edges, keyed.edges);
        }
    }
}

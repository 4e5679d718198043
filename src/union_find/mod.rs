//! # Union–Find
//!
//! [`DisjointSet`] partitions the fixed universe `0..n` into disjoint sets with
//! path compression and union by rank. [`KeyedDisjointSet`] layers a dense
//! re-indexing of arbitrary hashable keys on top of it.
//!
//! Parent pointers live in [`Cell`]s so that [`DisjointSet::find`] can compress
//! paths through a shared reference. This also makes the structure `!Sync`:
//! sharing one instance between threads requires external synchronisation.

use std::{cell::Cell, cmp::Ordering, hash::Hash};

use ahash::RandomState;
use derive_more::{From, Into};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct ParentPointer(pub usize);

/// A node of the union–find forest.
///
/// - `Root { rank }` is a set representative; `rank` bounds the height of its
///   tree and only decides merge direction.
/// - `Child(parent)` points one step closer to the representative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UFNode {
    Root { rank: usize },
    Child(ParentPointer),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnionFindError {
    #[error("Element {index} out of range for a disjoint set of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Key is not an element of the disjoint set")]
    UnknownKey,
}

#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    nodes: Vec<Cell<UFNode>>,
}

impl DisjointSet {
    /// Creates `n` singleton sets `{0}, {1}, …, {n - 1}`.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            nodes: (0..n).map(|_| Cell::new(UFNode::Root { rank: 0 })).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a new singleton set and returns its element.
    pub fn make_set(&mut self) -> usize {
        self.nodes.push(Cell::new(UFNode::Root { rank: 0 }));
        self.nodes.len() - 1
    }

    fn node(&self, x: usize) -> Result<&Cell<UFNode>, UnionFindError> {
        self.nodes.get(x).ok_or(UnionFindError::IndexOutOfRange {
            index: x,
            len: self.nodes.len(),
        })
    }

    /// Finds the representative of the set containing `x`.
    ///
    /// Every node on the walk from `x` to the root is re-pointed directly at
    /// the root.
    pub fn find(&self, x: usize) -> Result<usize, UnionFindError> {
        let mut root = x;
        while let UFNode::Child(parent) = self.node(root)?.get() {
            root = parent.0;
        }

        let mut current = x;
        while current != root {
            let cell = &self.nodes[current];
            let UFNode::Child(parent) = cell.get() else {
                break;
            };
            cell.set(UFNode::Child(root.into()));
            current = parent.into();
        }

        Ok(root)
    }

    fn rank(&self, root: usize) -> usize {
        match self.nodes[root].get() {
            UFNode::Root { rank } => rank,
            UFNode::Child(_) => unreachable!("find() should always return a root"),
        }
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` if they were already the same set. The root of lower
    /// rank is attached under the root of higher rank; on equal ranks the root
    /// of `y` goes under the root of `x`, whose rank grows by one.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool, UnionFindError> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;
        if root_x == root_y {
            return Ok(false);
        }

        let rank_x = self.rank(root_x);
        let rank_y = self.rank(root_y);
        match rank_x.cmp(&rank_y) {
            Ordering::Less => self.nodes[root_x].set(UFNode::Child(ParentPointer(root_y))),
            Ordering::Greater => self.nodes[root_y].set(UFNode::Child(ParentPointer(root_x))),
            Ordering::Equal => {
                self.nodes[root_y].set(UFNode::Child(ParentPointer(root_x)));
                self.nodes[root_x].set(UFNode::Root { rank: rank_x + 1 });
            }
        }
        Ok(true)
    }

    pub fn same_set(&self, x: usize, y: usize) -> Result<bool, UnionFindError> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Number of disjoint sets.
    pub fn n_sets(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.get(), UFNode::Root { .. }))
            .count()
    }

    /// The partition as groups of elements.
    ///
    /// Groups are ordered by their smallest element and list their elements in
    /// ascending order.
    pub fn sets(&self) -> Vec<Vec<usize>> {
        let mut groups: IndexMap<usize, Vec<usize>, RandomState> = IndexMap::default();
        for x in 0..self.nodes.len() {
            let Ok(root) = self.find(x) else {
                unreachable!("every element below len is in range")
            };
            groups.entry(root).or_default().push(x);
        }
        groups.into_values().collect()
    }
}

/// A [`DisjointSet`] over arbitrary keys.
///
/// Keys are numbered densely in insertion order; the number of a key is its
/// element in the underlying [`DisjointSet`].
#[derive(Debug, Clone)]
pub struct KeyedDisjointSet<K> {
    keys: IndexSet<K, RandomState>,
    sets: DisjointSet,
}

impl<K> Default for KeyedDisjointSet<K> {
    fn default() -> Self {
        KeyedDisjointSet {
            keys: IndexSet::default(),
            sets: DisjointSet::default(),
        }
    }
}

impl<K: Hash + Eq> KeyedDisjointSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Adds `key` as a singleton set unless present; returns its element.
    pub fn insert(&mut self, key: K) -> usize {
        let (index, inserted) = self.keys.insert_full(key);
        if inserted {
            self.sets.make_set();
        }
        index
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    pub fn key(&self, index: usize) -> Option<&K> {
        self.keys.get_index(index)
    }

    fn element(&self, key: &K) -> Result<usize, UnionFindError> {
        self.index_of(key).ok_or(UnionFindError::UnknownKey)
    }

    /// The representative key of the set containing `key`.
    pub fn find(&self, key: &K) -> Result<&K, UnionFindError> {
        let root = self.sets.find(self.element(key)?)?;
        self.key(root).ok_or(UnionFindError::UnknownKey)
    }

    pub fn union(&mut self, x: &K, y: &K) -> Result<bool, UnionFindError> {
        let x = self.element(x)?;
        let y = self.element(y)?;
        self.sets.union(x, y)
    }

    /// Inserts both keys if needed, then merges their sets.
    pub fn union_or_insert(&mut self, x: K, y: K) -> bool {
        let x = self.insert(x);
        let y = self.insert(y);
        matches!(self.sets.union(x, y), Ok(true))
    }

    pub fn same_set(&self, x: &K, y: &K) -> Result<bool, UnionFindError> {
        self.sets.same_set(self.element(x)?, self.element(y)?)
    }

    pub fn n_sets(&self) -> usize {
        self.sets.n_sets()
    }

    /// The partition as groups of keys, ordered by first insertion.
    pub fn sets(&self) -> Vec<Vec<&K>> {
        self.sets
            .sets()
            .into_iter()
            .map(|group| group.into_iter().filter_map(|i| self.key(i)).collect())
            .collect()
    }
}

impl<K: Hash + Eq> FromIterator<K> for KeyedDisjointSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut sets = Self::new();
        for key in iter {
            sets.insert(key);
        }
        sets
    }
}

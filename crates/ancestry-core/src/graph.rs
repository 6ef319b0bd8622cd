//! Adjacency-list graph with depth-first path enumeration.
//!
//! Edges point from ancestor to descendant. The graph is expected to be acyclic; paths
//! and ancestry answers are only meaningful under that assumption, and nothing here
//! checks it.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::trace;

/// A directed graph given wholesale as `vertex -> ordered successors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGraph<V: Ord> {
    adjacency: BTreeMap<V, Vec<V>>,
}

impl<V: Ord + Clone> Default for PathGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Ord + Clone> PathGraph<V> {
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    pub fn from_adjacency(adjacency: BTreeMap<V, Vec<V>>) -> Self {
        Self { adjacency }
    }

    /// The key set of the adjacency mapping.
    ///
    /// A successor that never appears as a key is not a vertex.
    pub fn vertices(&self) -> BTreeSet<&V> {
        self.adjacency.keys().collect()
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Direct successors of `vertex` in adjacency order; empty for unknown vertices.
    pub fn successors(&self, vertex: &V) -> &[V] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Depth-first pre-order path starting at `start`.
    pub fn depth_first_path(&self, start: &V) -> Vec<V> {
        self.depth_first_path_from(start, Vec::new())
    }

    /// Continue a depth-first pre-order walk from `start`, appending to `visited`.
    ///
    /// Successors are taken in adjacency order and vertices already in `visited` are
    /// skipped, so `start` is the first new element. The returned sequence is exactly
    /// what a recursive walk would produce.
    pub fn depth_first_path_from(&self, start: &V, mut visited: Vec<V>) -> Vec<V> {
        let mut seen: BTreeSet<V> = visited.iter().cloned().collect();
        let mut stack = vec![start.clone()];

        while let Some(vertex) = stack.pop() {
            if seen.contains(&vertex) {
                continue;
            }
            // Push in reverse so the first successor is explored first.
            for next in self.successors(&vertex).iter().rev() {
                if !seen.contains(next) {
                    stack.push(next.clone());
                }
            }
            seen.insert(vertex.clone());
            visited.push(vertex);
        }

        trace!(len = visited.len(), "depth-first path complete");
        visited
    }

    /// Every vertex reachable from `vertex` through at least one edge.
    pub fn descendants(&self, vertex: &V) -> BTreeSet<V> {
        let mut distances = self.distances_from(vertex);
        distances.remove(vertex);
        distances.into_keys().collect()
    }

    /// Shortest edge count from `vertex` to everything reachable from it (itself at 0).
    pub fn distances_from(&self, vertex: &V) -> BTreeMap<V, usize> {
        let mut distances = BTreeMap::new();
        distances.insert(vertex.clone(), 0);
        let mut queue = VecDeque::from([vertex.clone()]);

        while let Some(current) = queue.pop_front() {
            let depth = distances[&current];
            for next in self.successors(&current) {
                if !distances.contains_key(next) {
                    distances.insert(next.clone(), depth + 1);
                    queue.push_back(next.clone());
                }
            }
        }

        distances
    }
}

impl<V: Ord + Clone> FromIterator<(V, Vec<V>)> for PathGraph<V> {
    fn from_iter<I: IntoIterator<Item = (V, Vec<V>)>>(iter: I) -> Self {
        Self::from_adjacency(iter.into_iter().collect())
    }
}

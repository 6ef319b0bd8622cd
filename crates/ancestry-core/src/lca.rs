//! Lowest common ancestor drivers for both data models.
//!
//! The tree driver validates that the queries are comparable with each other and with
//! the tree's keys before delegating. The graph drivers never fail; a missing vertex
//! simply yields no ancestor.

use crate::error::{AncestryError, Result};
use crate::graph::PathGraph;
use crate::key::Comparable;
use crate::tree::OrderedTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Tree LCA with a comparability check on the two queries and the root key.
pub fn bst_lowest_common_ancestor<'t, K>(
    tree: &'t OrderedTree<K>,
    a: &K,
    b: &K,
) -> Result<Option<&'t K>>
where
    K: Ord + Comparable,
{
    a.ensure_comparable(b)?;
    if let Some(root) = tree.root_key() {
        root.ensure_comparable(a)?;
    }
    Ok(tree.find_common_ancestor(a, b))
}

/// Graph LCA by depth-first path prefix matching.
///
/// Walks the pre-order paths from `a` and from `b` side by side and returns the first
/// vertex that sits at the same position in both. This matches true ancestry only when
/// both paths run in step from a shared vertex onward, as they do in trees and in DAGs
/// whose branches converge at equal depth.
pub fn dag_lowest_common_ancestor<V: Ord + Clone>(
    graph: &PathGraph<V>,
    a: &V,
    b: &V,
) -> Option<V> {
    if !graph.contains(a) || !graph.contains(b) {
        debug!("query vertex missing from graph");
        return None;
    }
    let path_a = graph.depth_first_path(a);
    let path_b = graph.depth_first_path(b);

    let found = path_a
        .into_iter()
        .zip(path_b)
        .find(|(from_a, from_b)| from_a == from_b)
        .map(|(vertex, _)| vertex);
    debug!(found = found.is_some(), "path prefix query finished");
    found
}

/// Graph LCA by reachability.
///
/// Returns every vertex reachable from both `a` and `b` whose combined shortest
/// distance from the two is minimal, in ascending order. Empty when either query is
/// missing or nothing is reachable from both.
pub fn reachability_common_ancestors<V: Ord + Clone>(
    graph: &PathGraph<V>,
    a: &V,
    b: &V,
) -> Vec<V> {
    if !graph.contains(a) || !graph.contains(b) {
        return Vec::new();
    }
    let mut from_a = graph.distances_from(a);
    let mut from_b = graph.distances_from(b);
    from_a.remove(a);
    from_b.remove(b);

    let combined: Vec<(V, usize)> = from_a
        .into_iter()
        .filter_map(|(vertex, da)| from_b.get(&vertex).map(|db| (vertex, da + db)))
        .collect();
    let Some(best) = combined.iter().map(|(_, total)| *total).min() else {
        return Vec::new();
    };

    combined
        .into_iter()
        .filter(|(_, total)| *total == best)
        .map(|(vertex, _)| vertex)
        .collect()
}

/// Which graph LCA algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DagStrategy {
    #[default]
    PathPrefix,
    Reachability,
}

impl DagStrategy {
    /// Run the selected algorithm; path prefix yields at most one vertex.
    pub fn query<V: Ord + Clone>(self, graph: &PathGraph<V>, a: &V, b: &V) -> Vec<V> {
        match self {
            DagStrategy::PathPrefix => dag_lowest_common_ancestor(graph, a, b)
                .into_iter()
                .collect(),
            DagStrategy::Reachability => reachability_common_ancestors(graph, a, b),
        }
    }
}

impl fmt::Display for DagStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DagStrategy::PathPrefix => write!(f, "path-prefix"),
            DagStrategy::Reachability => write!(f, "reachability"),
        }
    }
}

impl FromStr for DagStrategy {
    type Err = AncestryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "path-prefix" | "path_prefix" | "prefix" => Ok(DagStrategy::PathPrefix),
            "reachability" | "reach" => Ok(DagStrategy::Reachability),
            other => Err(AncestryError::Config(format!(
                "unknown dag strategy '{}' (expected path-prefix or reachability)",
                other
            ))),
        }
    }
}

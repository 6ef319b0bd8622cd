//! JSON fixtures describing a tree insert sequence or a graph adjacency list.
//!
//! ```json
//! { "keys": [30, 8, 52, 3] }
//! { "vertices": [ { "id": 1, "successors": [2, 3] }, { "id": 2 } ] }
//! ```

use crate::error::{AncestryError, Result};
use crate::graph::PathGraph;
use crate::key::Key;
use crate::tree::OrderedTree;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Keys inserted into a tree in the given order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeFixture {
    pub keys: Vec<Key>,
}

/// One adjacency entry: a vertex and its ordered successors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexEntry {
    pub id: Key,
    #[serde(default)]
    pub successors: Vec<Key>,
}

/// A graph given as an ordered list of adjacency entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFixture {
    pub vertices: Vec<VertexEntry>,
}

impl TreeFixture {
    pub fn from_json(json: &str) -> Result<Self> {
        decode(json)
    }

    /// Insert every key in order. All keys must share one kind.
    pub fn build(&self) -> Result<OrderedTree<Key>> {
        let mut tree = OrderedTree::new();
        for key in &self.keys {
            tree.try_insert(key.clone())?;
        }
        debug!(inserted = self.keys.len(), nodes = tree.len(), "built tree fixture");
        Ok(tree)
    }
}

impl GraphFixture {
    pub fn from_json(json: &str) -> Result<Self> {
        decode(json)
    }

    /// Build the adjacency mapping. Each vertex may be listed once.
    pub fn build(&self) -> Result<PathGraph<Key>> {
        let mut adjacency = BTreeMap::new();
        for entry in &self.vertices {
            if adjacency
                .insert(entry.id.clone(), entry.successors.clone())
                .is_some()
            {
                return Err(AncestryError::Fixture(format!(
                    "vertex {} listed more than once",
                    entry.id
                )));
            }
        }
        debug!(vertices = adjacency.len(), "built graph fixture");
        Ok(PathGraph::from_adjacency(adjacency))
    }
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| AncestryError::Fixture(e.to_string()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AncestryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a tree fixture from disk and build the tree.
pub fn load_tree(path: &Path) -> Result<OrderedTree<Key>> {
    TreeFixture::from_json(&read(path)?)?.build()
}

/// Read a graph fixture from disk and build the graph.
pub fn load_graph(path: &Path) -> Result<PathGraph<Key>> {
    GraphFixture::from_json(&read(path)?)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyKind;

    #[test]
    fn test_tree_fixture() {
        let fixture = TreeFixture::from_json(r#"{"keys": [2, 1, 3, 1]}"#).unwrap();
        let tree = fixture.build().unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root_key(), Some(&Key::Int(2)));
    }

    #[test]
    fn test_text_tree_fixture() {
        let tree = TreeFixture::from_json(r#"{"keys": ["m", "c", "x"]}"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            tree.find_common_ancestor(&Key::from("c"), &Key::from("x")),
            Some(&Key::from("m"))
        );
    }

    #[test]
    fn test_mixed_tree_fixture_rejected() {
        let fixture = TreeFixture::from_json(r#"{"keys": [2, "b"]}"#).unwrap();
        assert!(matches!(
            fixture.build(),
            Err(AncestryError::TypeMismatch {
                left: KeyKind::Integer,
                right: KeyKind::Text
            })
        ));
    }

    #[test]
    fn test_empty_tree_fixture() {
        let tree = TreeFixture::from_json(r#"{"keys": []}"#)
            .unwrap()
            .build()
            .unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_graph_fixture_defaults_successors() {
        let graph = GraphFixture::from_json(
            r#"{"vertices": [{"id": 1, "successors": [2]}, {"id": 2}]}"#,
        )
        .unwrap()
        .build()
        .unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.successors(&Key::Int(2)).is_empty());
    }

    #[test]
    fn test_graph_fixture_duplicate_vertex() {
        let err = GraphFixture::from_json(r#"{"vertices": [{"id": 1}, {"id": 1}]}"#)
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid fixture: vertex 1 listed more than once");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            TreeFixture::from_json("{\"keys\": [1,"),
            Err(AncestryError::Fixture(_))
        ));
        assert!(matches!(
            TreeFixture::from_json(r#"{"keys": [1.5]}"#),
            Err(AncestryError::Fixture(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tree(Path::new("/nonexistent/tree.json")).unwrap_err();
        assert!(matches!(err, AncestryError::Io { .. }));
    }
}

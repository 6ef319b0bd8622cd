//! Unbalanced binary search tree with proper-ancestor LCA queries.
//!
//! Keys are unique: inserting a key equal to a stored one replaces the stored value in
//! place and leaves the shape untouched. Nodes are never removed.

use crate::error::Result;
use crate::key::Comparable;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

/// A binary search tree that owns its nodes exclusively; each child has one parent.
///
/// Nothing rebalances the tree, so sorted input degenerates into a chain as deep as the
/// tree is large. Every walk, including drop, uses a loop or an explicit stack.
pub struct OrderedTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for OrderedTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderedTree<K> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of distinct keys (nodes) in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root_key(&self) -> Option<&K> {
        self.root.as_deref().map(|n| &n.key)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }

    /// Iterate keys in ascending order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl<K: Ord> OrderedTree<K> {
    /// Insert `key`, overwriting an equal stored key without creating a node.
    pub fn insert(&mut self, key: K) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    node.key = key;
                    return;
                }
            };
        }
        *slot = Some(Box::new(Node::new(key)));
        self.len += 1;
    }

    /// Return the stored key equal to `key`, if any.
    pub fn lookup(&self, key: &K) -> Option<&K> {
        Self::lookup_from(self.root.as_deref(), key)
    }

    pub fn exists(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup_from<'a>(mut node: Option<&'a Node<K>>, key: &K) -> Option<&'a K> {
        while let Some(current) = node {
            match key.cmp(&current.key) {
                Ordering::Less => node = current.left.as_deref(),
                Ordering::Greater => node = current.right.as_deref(),
                Ordering::Equal => return Some(&current.key),
            }
        }
        None
    }

    /// Find the lowest proper common ancestor of `a` and `b`.
    ///
    /// Returns `None` when the tree is empty, when `a == b`, when either query is the
    /// root, or when the point where the two queries diverge does not actually hold both
    /// of them. While both queries lie on the same side of a node, reaching a child equal
    /// to either query ends the search at that node.
    pub fn find_common_ancestor(&self, a: &K, b: &K) -> Option<&K> {
        if a == b {
            debug!("identical queries have no common ancestor");
            return None;
        }
        let root = self.root.as_deref()?;
        let mut node = root;
        let mut depth = 0_usize;

        let found = loop {
            match (a.cmp(&node.key), b.cmp(&node.key)) {
                (Ordering::Greater, Ordering::Greater) => {
                    let Some(right) = node.right.as_deref() else {
                        break None;
                    };
                    if right.key == *a || right.key == *b {
                        break Some(&node.key);
                    }
                    trace!(depth, "both queries greater, descending right");
                    node = right;
                }
                (Ordering::Less, Ordering::Less) => {
                    let Some(left) = node.left.as_deref() else {
                        break None;
                    };
                    if left.key == *a || left.key == *b {
                        break Some(&node.key);
                    }
                    trace!(depth, "both queries less, descending left");
                    node = left;
                }
                // The root has no ancestor, so a query equal to it has none in common.
                _ if *a == root.key || *b == root.key => break None,
                _ => {
                    trace!(depth, "queries diverge, validating membership");
                    let both_present = Self::lookup_from(Some(node), a).is_some()
                        && Self::lookup_from(Some(node), b).is_some();
                    break both_present.then_some(&node.key);
                }
            }
            depth += 1;
        };

        debug!(depth, found = found.is_some(), "common ancestor query finished");
        found
    }
}

impl<K: Ord + Comparable> OrderedTree<K> {
    /// Insert `key` after checking it can be compared with the keys already stored.
    ///
    /// Only the root is checked; every stored key passed the same check on the way in.
    pub fn try_insert(&mut self, key: K) -> Result<()> {
        if let Some(root) = self.root_key() {
            root.ensure_comparable(&key)?;
        }
        self.insert(key);
        Ok(())
    }
}

impl<K: Clone> Clone for OrderedTree<K> {
    fn clone(&self) -> Self {
        let mut root = self.root.as_deref().map(|n| Box::new(Node::new(n.key.clone())));
        // Pairs of (source node, slot in the copy that mirrors it).
        let mut stack: Vec<(&Node<K>, &mut Box<Node<K>>)> = Vec::new();
        if let (Some(source), Some(target)) = (self.root.as_deref(), root.as_mut()) {
            stack.push((source, target));
        }

        while let Some((source, target)) = stack.pop() {
            let Node { left, right, .. } = &mut **target;
            if let Some(child) = source.left.as_deref() {
                let copy = left.insert(Box::new(Node::new(child.key.clone())));
                stack.push((child, copy));
            }
            if let Some(child) = source.right.as_deref() {
                let copy = right.insert(Box::new(Node::new(child.key.clone())));
                stack.push((child, copy));
            }
        }

        Self {
            root,
            len: self.len,
        }
    }
}

impl<K> Drop for OrderedTree<K> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for OrderedTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<K: Ord> FromIterator<K> for OrderedTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for OrderedTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Ascending-order iterator over tree keys, driven by an explicit stack.
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

//! Formatting implementation for the RadixTree

use std::fmt::{Debug, Formatter, Result};

use crate::node::Node;
use crate::RadixTree;

/// Prints the structure of the tree: a branch as `{bit: (left, right)}`, a leaf as the map of its
/// entries, and an empty leaf as `{}`.
impl<K: Debug, V: Debug> Debug for RadixTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        DebugNode(self.root()).fmt(f)
    }
}

struct DebugNode<'a, K, V>(&'a Node<K, V>);

impl<K: Debug, V: Debug> Debug for DebugNode<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.0 {
            Node::Empty => f.debug_map().finish(),
            Node::Leaf(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
            Node::Branch { bit, left, right } => f
                .debug_map()
                .entry(bit, &(DebugNode(left.as_ref()), DebugNode(right.as_ref())))
                .finish(),
        }
    }
}

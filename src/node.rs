//! The nodes of the radix tree.

use std::sync::Arc;

use crate::Key;

/// A node of the tree. Children are reference counted, such that a modified tree shares every
/// untouched subtree with the tree it was derived from.
pub(crate) enum Node<K, V> {
    /// A leaf without entries. Only ever a direct child of the root.
    Empty,
    /// A chain of keys that only differ in trailing zero bits, ordered by strictly decreasing
    /// length. Never empty.
    Leaf(Vec<(K, V)>),
    /// A binary fork at bit position `bit`. Keys with that bit set (a real bit, never a virtual
    /// one) live in `right`, all others in `left`.
    Branch {
        bit: usize,
        left: Arc<Node<K, V>>,
        right: Arc<Node<K, V>>,
    },
}

impl<K, V> Node<K, V> {
    /// The root of an empty tree.
    pub(crate) fn root() -> Self {
        Self::branch(0, Arc::new(Node::Empty), Arc::new(Node::Empty))
    }

    #[inline(always)]
    pub(crate) fn branch(bit: usize, left: Arc<Self>, right: Arc<Self>) -> Self {
        Self::Branch { bit, left, right }
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Any key of the leaf; all of them are equal under virtual-zero extension.
    #[inline(always)]
    pub(crate) fn representative(&self) -> Option<&K> {
        match self {
            Node::Leaf(entries) => entries.first().map(|(k, _)| k),
            _ => None,
        }
    }
}

impl<K: Key, V> Node<K, V> {
    /// Follow the bits of `key` down to the leaf (possibly empty) that owns it.
    pub(crate) fn leaf_for(&self, key: &K) -> &Self {
        let mut node = self;
        while let Node::Branch { bit, left, right } = node {
            node = if key.is_bit_set(*bit) { right } else { left };
        }
        node
    }
}

impl<K: Key, V> Node<K, V> {
    /// Create a branch at `bit` that holds the singleton leaf `(key, value)` on the side
    /// dictated by `key`, and `other` on the opposite side.
    pub(crate) fn fork(bit: usize, key: K, value: V, other: Arc<Self>) -> Self {
        let right = key.is_bit_set(bit);
        let leaf = Arc::new(Node::Leaf(vec![(key, value)]));
        if right {
            Self::branch(bit, other, leaf)
        } else {
            Self::branch(bit, leaf, other)
        }
    }

    /// Rebuild a branch after one of its children was replaced. The root is kept as is, every
    /// other branch collapses if one of its children became empty.
    pub(crate) fn rejoin(bit: usize, left: Arc<Self>, right: Arc<Self>, is_root: bool) -> Arc<Self> {
        if is_root {
            return Arc::new(Self::branch(bit, left, right));
        }
        match (left.is_empty(), right.is_empty()) {
            (true, true) => Arc::new(Node::Empty),
            (true, false) => right,
            (false, true) => left,
            (false, false) => Arc::new(Self::branch(bit, left, right)),
        }
    }
}

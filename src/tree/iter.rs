//! Module that contains the implementation for the iterators and folds

use crate::node::Node;
use crate::*;

/// An iterator over all entries of a [`RadixTree`], depth first, left before right, and the
/// entries of each leaf from the longest to the shortest key.
pub struct Iter<'a, K, V> {
    nodes: Vec<&'a Node<K, V>>,
    leaf: std::slice::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            leaf: self.leaf.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        loop {
            if let Some((k, v)) = self.leaf.next() {
                return Some((k, v));
            }
            match self.nodes.pop()? {
                Node::Branch { left, right, .. } => {
                    self.nodes.push(right.as_ref());
                    self.nodes.push(left.as_ref());
                }
                Node::Leaf(entries) => self.leaf = entries.iter(),
                Node::Empty => {}
            }
        }
    }
}

/// An iterator over all keys of a [`RadixTree`], in the order of [`Iter`].
#[derive(Clone)]
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over all values of a [`RadixTree`], in the order of [`Iter`].
#[derive(Clone)]
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<'a, K, V> IntoIterator for &'a RadixTree<K, V> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            nodes: vec![self.root()],
            leaf: (&[]).iter(),
        }
    }
}

/// A node as seen by [`RadixTree::walk`].
#[derive(Debug)]
pub enum Visit<'a, K, V> {
    /// A branch that splits its keys at bit position `bit`.
    Branch {
        /// The bit position.
        bit: usize,
    },
    /// A leaf, with its entries ordered from the longest to the shortest key. Empty leaves are
    /// visited with an empty slice.
    Leaf(&'a [(K, V)]),
}

impl<K, V> Clone for Visit<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Visit<'_, K, V> {}

impl<K, V> RadixTree<K, V> {
    /// An iterator visiting all key-value pairs. The iterator element type is `(&K, &V)`.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new()
    ///     .put("1".parse()?, 1)
    ///     .put("0".parse()?, 2)
    ///     .put("00".parse()?, 3)
    ///     .put("01".parse()?, 4);
    /// assert_eq!(t.values().collect::<Vec<_>>(), vec![&3, &2, &4, &1]);
    /// # Ok(())
    /// # }
    /// ```
    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// An iterator visiting all keys. The iterator element type is `&K`.
    #[inline(always)]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values. The iterator element type is `&V`.
    #[inline(always)]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Number of entries. This traverses the whole tree and is therefore `O(n)`.
    pub fn len(&self) -> usize {
        self.reduce(0, |n, _, _| n + 1)
    }

    /// Fold all entries into an accumulator, in the order of [`RadixTree::iter`].
    pub fn reduce<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        self.iter().fold(init, |acc, (k, v)| f(acc, k, v))
    }

    /// All entries as owned pairs, in the order of [`RadixTree::iter`].
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Visit every node of the tree, including the root and empty leaves, in the given `order`.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new().put("1".parse()?, 1).put("11".parse()?, 2);
    /// let shape = t.walk(Vec::new(), Order::Post, |mut acc, node| {
    ///     acc.push(match node {
    ///         Visit::Branch { bit } => format!("b{bit}"),
    ///         Visit::Leaf(entries) => format!("l{}", entries.len()),
    ///     });
    ///     acc
    /// });
    /// assert_eq!(shape, vec!["l0", "l1", "l1", "b1", "b0"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn walk<'a, A, F>(&'a self, init: A, order: Order, mut f: F) -> A
    where
        F: FnMut(A, Visit<'a, K, V>) -> A,
    {
        walk_node(self.root(), init, order, &mut f)
    }
}

fn walk_node<'a, K, V, A, F>(node: &'a Node<K, V>, acc: A, order: Order, f: &mut F) -> A
where
    F: FnMut(A, Visit<'a, K, V>) -> A,
{
    match node {
        Node::Branch { bit, left, right } => {
            let visit = Visit::Branch { bit: *bit };
            let mut acc = acc;
            if order == Order::Pre {
                acc = f(acc, visit);
            }
            acc = walk_node(left, acc, order, f);
            if order == Order::In {
                acc = f(acc, visit);
            }
            acc = walk_node(right, acc, order, f);
            if order == Order::Post {
                acc = f(acc, visit);
            }
            acc
        }
        Node::Leaf(entries) => f(acc, Visit::Leaf(entries)),
        Node::Empty => f(acc, Visit::Leaf(&[])),
    }
}

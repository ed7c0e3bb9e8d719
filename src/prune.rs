//! Combining sibling keys into their parent, and discovering such siblings.
//!
//! Two keys of equal length that only differ in their last bit are *siblings*. The key ending in
//! `0` is the left one, the key ending in `1` the right one, and dropping the last bit of either
//! gives their common *parent*.

use tracing::{debug, trace};

use crate::{Key, Pruning, RadixTree};

/// A pair of sibling keys that are both stored in the tree, as passed to the combiner of
/// [`RadixTree::prune`].
#[derive(Debug)]
pub struct Siblings<'a, K, V> {
    /// The common parent key, one bit shorter than the siblings.
    pub parent: K,
    /// The value stored under the parent key, if any.
    pub parent_value: Option<&'a V>,
    /// The sibling ending in a `0` bit.
    pub left: (&'a K, &'a V),
    /// The sibling ending in a `1` bit.
    pub right: (&'a K, &'a V),
}

/// The decision of a pruning combiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combine<V> {
    /// Remove both siblings and store this value under their parent key.
    Accept(V),
    /// Keep both siblings.
    Reject,
}

/// A pair of stored sibling keys, as reported by [`RadixTree::adjacencies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency<K, V> {
    /// The sibling ending in a `0` bit, with its value.
    pub left: (K, V),
    /// The sibling ending in a `1` bit, with its value.
    pub right: (K, V),
    /// The value of the parent key, if it is stored.
    pub parent: Option<V>,
}

/// For a key ending in `1`, its left sibling and their parent.
fn left_and_parent<K: Key>(right: &K) -> Option<(K, K)> {
    let last = right.bit_len().checked_sub(1)?;
    right
        .is_bit_set(last)
        .then(|| (right.with_bit(last, false), right.truncate(last)))
}

impl<K, V> RadixTree<K, V>
where
    K: Key,
    V: Clone,
{
    /// Combine stored siblings into their parent key.
    ///
    /// A pass visits the keys of the tree as it was when the pass started. For every key ending
    /// in `1` whose sibling is (still) stored, `f` decides whether to replace the two by their
    /// parent. With [`Pruning::Recurse`], passes are repeated until one of them does not combine
    /// anything, such that new parents can be combined further.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// fn sum(s: &Siblings<Bits, i32>) -> Combine<i32> {
    ///     Combine::Accept(s.left.1 + s.right.1)
    /// }
    ///
    /// let t: RadixTree<Bits, _> = RadixTree::from_pairs([
    ///     ("10".parse()?, 4),
    ///     ("110".parse()?, 1),
    ///     ("111".parse()?, 2),
    /// ]);
    /// let once = t.prune(sum, Pruning::Once);
    /// assert_eq!(once.to_vec(), vec![("10".parse()?, 4), ("11".parse()?, 3)]);
    /// let all = t.prune(sum, Pruning::Recurse);
    /// assert_eq!(all.to_vec(), vec![("1".parse()?, 7)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn prune<F>(&self, mut f: F, mode: Pruning) -> Self
    where
        F: FnMut(&Siblings<'_, K, V>) -> Combine<V>,
    {
        let mut tree = self.clone();
        let mut pass = 0;
        loop {
            pass += 1;
            let (next, merged) = prune_pass(&tree, &mut f);
            debug!(pass, merged, len = next.len(), "pruning pass");
            tree = next;
            if merged == 0 || mode == Pruning::Once {
                return tree;
            }
        }
    }

    /// All pairs of stored siblings, keyed by their parent. The tree itself is not modified.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::from_pairs([
    ///     ("0".parse()?, 1),
    ///     ("00".parse()?, 2),
    ///     ("01".parse()?, 3),
    ///     ("11".parse()?, 4),
    /// ]);
    /// let adj = t.adjacencies();
    /// assert_eq!(adj.len(), 1);
    /// assert_eq!(
    ///     adj.get(&"0".parse()?),
    ///     Some(&Adjacency {
    ///         left: ("00".parse()?, 2),
    ///         right: ("01".parse()?, 3),
    ///         parent: Some(1),
    ///     })
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn adjacencies(&self) -> RadixTree<K, Adjacency<K, V>> {
        self.iter()
            .filter_map(|(k2, v2)| {
                let (k1, k0) = left_and_parent(k2)?;
                let v1 = self.get(&k1)?.clone();
                let adjacency = Adjacency {
                    parent: self.get(&k0).cloned(),
                    left: (k1, v1),
                    right: (k2.clone(), v2.clone()),
                };
                Some((k0, adjacency))
            })
            .collect()
    }
}

/// A single pruning pass. Returns the new tree and the number of combined sibling pairs.
fn prune_pass<K, V, F>(tree: &RadixTree<K, V>, f: &mut F) -> (RadixTree<K, V>, usize)
where
    K: Key,
    V: Clone,
    F: FnMut(&Siblings<'_, K, V>) -> Combine<V>,
{
    let mut acc = tree.clone();
    let mut merged = 0;
    for k2 in tree.keys() {
        let Some((k1, k0)) = left_and_parent(k2) else {
            continue;
        };
        let decision = match (acc.get_key_value(&k1), acc.get_key_value(k2)) {
            (Some(left), Some(right)) => f(&Siblings {
                parent_value: acc.get(&k0),
                parent: k0.clone(),
                left,
                right,
            }),
            _ => continue,
        };
        if let Combine::Accept(value) = decision {
            trace!(parent_len = k0.bit_len(), "combined siblings");
            acc = acc.delete(&k1).delete(k2).put(k0, value);
            merged += 1;
        }
    }
    (acc, merged)
}

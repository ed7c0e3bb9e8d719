//! Implementation of the radix tree.

use std::fmt::Debug;
use std::sync::Arc;

use crate::node::Node;
use crate::{Bound, Error, Key};

mod combinators;
mod iter;

pub use combinators::*;
pub use iter::*;

/// Persistent path-compressed binary radix tree, mapping bit-string keys to values.
///
/// Every modifying operation takes `&self` and returns a new tree. The new tree shares all
/// subtrees that were not touched with the old one, so cloning a tree or keeping old versions
/// around is cheap, and any number of threads can read the same tree.
pub struct RadixTree<K, V> {
    root: Arc<Node<K, V>>,
}

impl<K, V> Clone for RadixTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<K, V> Default for RadixTree<K, V> {
    fn default() -> Self {
        Self {
            root: Arc::new(Node::root()),
        }
    }
}

impl<K, V> RadixTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the tree holds no entries. This is `O(1)`.
    pub fn is_empty(&self) -> bool {
        match self.root.as_ref() {
            Node::Branch { left, right, .. } => left.is_empty() && right.is_empty(),
            _ => false,
        }
    }

    pub(crate) fn root(&self) -> &Node<K, V> {
        &self.root
    }

    /// Wrap an arbitrary node, bypassing all invariants.
    #[cfg(test)]
    pub(crate) fn from_root(root: Node<K, V>) -> Self {
        Self {
            root: Arc::new(root),
        }
    }
}

impl<K, V> RadixTree<K, V>
where
    K: Key,
{
    /// Get the value stored under exactly `key`.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new().put("0110".parse()?, 1);
    /// assert_eq!(t.get(&"0110".parse()?), Some(&1));
    /// assert_eq!(t.get(&"011".parse()?), None);
    /// assert_eq!(t.get(&"01100".parse()?), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Get the stored key and value that are exactly equal to `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let kmax = key.bit_len();
        match self.root.leaf_for(key) {
            // longest first: once the entries get shorter than `key`, none can match anymore
            Node::Leaf(entries) => entries
                .iter()
                .take_while(|(k, _)| k.bit_len() >= kmax)
                .find(|(k, _)| k.eq_bits(key))
                .map(|(k, v)| (k, v)),
            _ => None,
        }
    }

    /// Check if `key` is stored in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Longest prefix match: the most specific stored key that is a prefix of `key`.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new()
    ///     .put("".parse()?, "default")
    ///     .put("01".parse()?, "a")
    ///     .put("0110".parse()?, "b");
    /// assert_eq!(t.lookup(&"01101111".parse()?), Some((&"0110".parse()?, &"b")));
    /// assert_eq!(t.lookup(&"0100".parse()?), Some((&"01".parse()?, &"a")));
    /// assert_eq!(t.lookup(&"1".parse()?), Some((&"".parse()?, &"default")));
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup(&self, key: &K) -> Option<(&K, &V)> {
        longest_match(&self.root, key, usize::MAX).map(|(k, v)| (k, v))
    }

    /// All stored keys that are a prefix of `key` (less specific or equal), most specific first.
    /// With [`Bound::Exclusive`], `key` itself is left out.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new()
    ///     .put("1".parse()?, 1)
    ///     .put("10".parse()?, 2)
    ///     .put("101".parse()?, 3)
    ///     .put("11".parse()?, 4);
    /// let keys = |r: Vec<(&Bits, &i32)>| r.into_iter().map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(keys(t.less(&"101".parse()?, Bound::Inclusive)), vec![3, 2, 1]);
    /// assert_eq!(keys(t.less(&"101".parse()?, Bound::Exclusive)), vec![2, 1]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn less(&self, key: &K, bound: Bound) -> Vec<(&K, &V)> {
        let mut result = Vec::new();
        collect_less(&self.root, key, usize::MAX, &mut result);
        exclude(result, key, bound)
    }

    /// All stored keys that `key` is a prefix of (more specific or equal), in traversal order.
    /// With [`Bound::Exclusive`], `key` itself is left out.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new()
    ///     .put("1".parse()?, 1)
    ///     .put("10".parse()?, 2)
    ///     .put("101".parse()?, 3)
    ///     .put("0".parse()?, 4);
    /// let keys = |r: Vec<(&Bits, &i32)>| r.into_iter().map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(keys(t.more(&"1".parse()?, Bound::Inclusive)), vec![2, 1, 3]);
    /// assert_eq!(keys(t.more(&"1".parse()?, Bound::Exclusive)), vec![2, 3]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn more(&self, key: &K, bound: Bound) -> Vec<(&K, &V)> {
        let mut result = Vec::new();
        collect_more(&self.root, key, &mut result);
        exclude(result, key, bound)
    }

    /// The bit position at which inserting `key` would fork the tree. `None` if `key` belongs to
    /// an existing leaf, either because it is stored already, because the tree has no entries on
    /// its path, or because it only differs from that leaf's keys by trailing zero bits.
    pub fn branch_point(&self, key: &K) -> Option<usize> {
        let rep = self.root.leaf_for(key).representative()?;
        let at = rep.first_diff_bit(key);
        (rep.is_bit_set(at) != key.is_bit_set(at)).then_some(at)
    }

    /// Check the structural invariants of the tree, reporting the first violation found.
    ///
    /// A tree built only through this API always passes.
    pub fn validate(&self) -> Result<(), Error>
    where
        K: Debug,
    {
        match self.root.as_ref() {
            Node::Branch {
                bit: 0,
                left,
                right,
            } => {
                check(left, &mut vec![(0, false)])?;
                check(right, &mut vec![(0, true)])
            }
            Node::Branch { bit, .. } => Err(Error::RootReplaced(Some(*bit))),
            _ => Err(Error::RootReplaced(None)),
        }
    }
}

impl<K, V> RadixTree<K, V>
where
    K: Key,
    V: Clone,
{
    /// Create a tree from a sequence of key-value pairs. Later pairs overwrite earlier ones with
    /// the same key.
    pub fn from_pairs<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self::new().put_all(pairs)
    }

    /// Return a tree that maps `key` to `value`, replacing any previous value of `key`. The
    /// stored key is replaced as well, which matters for keys that carry bits [`Key::eq_bits`]
    /// ignores.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let a: RadixTree<Bits, _> = RadixTree::new().put("10".parse()?, 1);
    /// let b = a.put("10".parse()?, 2).put("11".parse()?, 3);
    /// assert_eq!(a.get(&"10".parse()?), Some(&1));
    /// assert_eq!(b.get(&"10".parse()?), Some(&2));
    /// assert_eq!(b.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn put(&self, key: K, value: V) -> Self {
        let split = self.branch_point(&key);
        Self {
            root: insert(&self.root, split, key, value, true),
        }
    }

    /// Put all pairs, in order.
    pub fn put_all<I: IntoIterator<Item = (K, V)>>(&self, pairs: I) -> Self {
        pairs
            .into_iter()
            .fold(self.clone(), |tree, (k, v)| tree.put(k, v))
    }

    /// Return a tree without `key`. If `key` is not stored, the returned tree shares its root
    /// with `self`.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let a: RadixTree<Bits, _> = RadixTree::from_pairs([("10".parse()?, 1), ("11".parse()?, 2)]);
    /// let b = a.delete(&"10".parse()?);
    /// assert_eq!(b.get(&"10".parse()?), None);
    /// assert_eq!(b.get(&"11".parse()?), Some(&2));
    /// assert_eq!(a.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete(&self, key: &K) -> Self {
        self.remove_entry(key)
            .map(|(tree, _)| tree)
            .unwrap_or_else(|| self.clone())
    }

    /// Remove `key`, returning the new tree and the removed pair.
    pub(crate) fn remove_entry(&self, key: &K) -> Option<(Self, (K, V))> {
        remove(&self.root, key, true).map(|(root, pair)| (Self { root }, pair))
    }
}

/// Insert `(key, value)` below `node`. `split` is the branch point computed for `key` on the
/// whole tree; `None` means the key ends up in the leaf on its path.
fn insert<K, V>(
    node: &Arc<Node<K, V>>,
    split: Option<usize>,
    key: K,
    value: V,
    is_root: bool,
) -> Arc<Node<K, V>>
where
    K: Key,
    V: Clone,
{
    match (node.as_ref(), split) {
        // the new fork belongs above this branch
        (Node::Branch { bit, .. }, Some(at)) if !is_root && at < *bit => {
            Arc::new(Node::fork(at, key, value, node.clone()))
        }
        (Node::Branch { bit, left, right }, _) => {
            if key.is_bit_set(*bit) {
                let right = insert(right, split, key, value, false);
                Arc::new(Node::branch(*bit, left.clone(), right))
            } else {
                let left = insert(left, split, key, value, false);
                Arc::new(Node::branch(*bit, left, right.clone()))
            }
        }
        // split
        (Node::Leaf(_), Some(at)) => Arc::new(Node::fork(at, key, value, node.clone())),
        // update or add
        (Node::Leaf(entries), None) => Arc::new(Node::Leaf(add_to_chain(entries, key, value))),
        // take
        (Node::Empty, _) => Arc::new(Node::Leaf(vec![(key, value)])),
    }
}

/// Copy a leaf with `(key, value)` added, or with the entry of `key` replaced.
fn add_to_chain<K, V>(entries: &[(K, V)], key: K, value: V) -> Vec<(K, V)>
where
    K: Key,
    V: Clone,
{
    let mut entries = entries.to_vec();
    let len = key.bit_len();
    match entries.iter().position(|(k, _)| k.bit_len() <= len) {
        Some(i) if entries[i].0.eq_bits(&key) => entries[i] = (key, value),
        Some(i) => entries.insert(i, (key, value)),
        None => entries.push((key, value)),
    }
    entries
}

/// Remove `key` below `node`, collapsing every branch that is left with a single child. Returns
/// `None` if the key is not stored.
fn remove<K, V>(node: &Arc<Node<K, V>>, key: &K, is_root: bool) -> Option<(Arc<Node<K, V>>, (K, V))>
where
    K: Key,
    V: Clone,
{
    match node.as_ref() {
        Node::Empty => None,
        Node::Leaf(entries) => {
            let idx = entries.iter().position(|(k, _)| k.eq_bits(key))?;
            let mut entries = entries.clone();
            let pair = entries.remove(idx);
            let leaf = if entries.is_empty() {
                Node::Empty
            } else {
                Node::Leaf(entries)
            };
            Some((Arc::new(leaf), pair))
        }
        Node::Branch { bit, left, right } => {
            if key.is_bit_set(*bit) {
                let (right, pair) = remove(right, key, false)?;
                Some((Node::rejoin(*bit, left.clone(), right, is_root), pair))
            } else {
                let (left, pair) = remove(left, key, false)?;
                Some((Node::rejoin(*bit, left, right.clone(), is_root), pair))
            }
        }
    }
}

/// Prefixes of `key` found below a branch at bit `b` on its left side, while `key` has bit `b`
/// set, are no longer than `b`. All their deeper bits are virtual zeros, so the search only goes
/// left at every branch at or beyond `limit`.
fn longest_match<'a, K: Key, V>(
    node: &'a Node<K, V>,
    key: &K,
    limit: usize,
) -> Option<&'a (K, V)> {
    match node {
        Node::Branch { left, bit, .. } if *bit >= limit => longest_match(left, key, limit),
        Node::Branch { bit, left, right } => {
            if key.is_bit_set(*bit) {
                // the left side may still hold a shorter prefix that stops before `bit`
                longest_match(right, key, limit).or_else(|| longest_match(left, key, *bit))
            } else {
                longest_match(left, key, limit)
            }
        }
        Node::Leaf(entries) => entries
            .iter()
            .skip_while(|(k, _)| k.bit_len() > key.bit_len())
            .find(|(k, _)| k.is_prefix_of(key)),
        Node::Empty => None,
    }
}

fn collect_less<'a, K: Key, V>(
    node: &'a Node<K, V>,
    key: &K,
    limit: usize,
    out: &mut Vec<(&'a K, &'a V)>,
) {
    match node {
        Node::Branch { left, bit, .. } if *bit >= limit => collect_less(left, key, limit, out),
        Node::Branch { bit, left, right } => {
            if key.is_bit_set(*bit) {
                collect_less(right, key, limit, out);
                collect_less(left, key, *bit, out);
            } else {
                collect_less(left, key, limit, out);
            }
        }
        Node::Leaf(entries) => out.extend(
            entries
                .iter()
                .filter(|(k, _)| k.is_prefix_of(key))
                .map(|(k, v)| (k, v)),
        ),
        Node::Empty => {}
    }
}

fn collect_more<'a, K: Key, V>(node: &'a Node<K, V>, key: &K, out: &mut Vec<(&'a K, &'a V)>) {
    match node {
        // within the key, every match has the same real bit as the key
        Node::Branch { bit, left, right } if *bit < key.bit_len() => {
            if key.is_bit_set(*bit) {
                collect_more(right, key, out)
            } else {
                collect_more(left, key, out)
            }
        }
        Node::Branch { left, right, .. } => {
            collect_more(left, key, out);
            collect_more(right, key, out);
        }
        Node::Leaf(entries) => out.extend(
            entries
                .iter()
                .filter(|(k, _)| key.is_prefix_of(k))
                .map(|(k, v)| (k, v)),
        ),
        Node::Empty => {}
    }
}

fn exclude<'a, K: Key, V>(
    mut result: Vec<(&'a K, &'a V)>,
    key: &K,
    bound: Bound,
) -> Vec<(&'a K, &'a V)> {
    if bound == Bound::Exclusive {
        result.retain(|(k, _)| !k.eq_bits(key));
    }
    result
}

/// Check the subtree below `node`. `path` holds the bit position and direction of every
/// ancestor branch.
fn check<K: Key + Debug, V>(node: &Node<K, V>, path: &mut Vec<(usize, bool)>) -> Result<(), Error> {
    match node {
        // a non-root parent rejects empty children itself
        Node::Empty => Ok(()),
        Node::Branch { bit, left, right } => {
            let parent = path.last().map(|(b, _)| *b).unwrap_or_default();
            if *bit <= parent {
                return Err(Error::UnorderedBranch {
                    parent,
                    child: *bit,
                });
            }
            if left.is_empty() || right.is_empty() {
                return Err(Error::OneWayBranch { bit: *bit });
            }
            path.push((*bit, false));
            check(left, path)?;
            path.pop();
            path.push((*bit, true));
            check(right, path)?;
            path.pop();
            Ok(())
        }
        Node::Leaf(entries) => {
            if entries.is_empty() {
                return Err(Error::EmptyLeaf);
            }
            for pair in entries.windows(2) {
                let (long, short) = (&pair[0].0, &pair[1].0);
                if long.bit_len() <= short.bit_len() {
                    return Err(Error::UnorderedLeaf);
                }
                let trailing_zeros = (short.bit_len()..long.bit_len()).all(|i| !long.is_bit_set(i));
                if !short.is_prefix_of(long) || !trailing_zeros {
                    return Err(Error::BrokenChain(
                        format!("{long:?}"),
                        format!("{short:?}"),
                    ));
                }
            }
            for (k, _) in entries {
                if let Some((bit, _)) = path.iter().find(|(bit, right)| k.is_bit_set(*bit) != *right) {
                    return Err(Error::MisplacedKey {
                        key: format!("{k:?}"),
                        bit: *bit,
                    });
                }
            }
            Ok(())
        }
    }
}

impl<K, V> PartialEq for RadixTree<K, V>
where
    K: Key,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some((ka, va)), Some((kb, vb))) if ka.eq_bits(kb) && va == vb => {}
                _ => return false,
            }
        }
    }
}

impl<K, V> Eq for RadixTree<K, V>
where
    K: Key,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for RadixTree<K, V>
where
    K: Key,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V> Extend<(K, V)> for RadixTree<K, V>
where
    K: Key,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        *self = self.put_all(iter);
    }
}

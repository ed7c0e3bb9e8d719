//! Operations composed of the basic lookups and modifications.

use std::borrow::Borrow;
use std::fmt::Debug;

use tracing::debug;

use crate::*;

/// What [`RadixTree::get_and_update`] should do with the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<R, V> {
    /// Store the value under the key (inserting or replacing it), and return the result.
    Replace(R, V),
    /// Remove the key (if present), and return the result.
    Pop(R),
}

impl<K, V> RadixTree<K, V>
where
    K: Key,
{
    /// Find a key either by exact match, or by longest prefix match.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new().put("10".parse()?, 1);
    /// assert_eq!(t.fetch(&"101".parse()?, Match::Exact), None);
    /// assert_eq!(t.fetch(&"101".parse()?, Match::Longest), Some((&"10".parse()?, &1)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn fetch(&self, key: &K, mode: Match) -> Option<(&K, &V)> {
        match mode {
            Match::Exact => self.get_key_value(key),
            Match::Longest => self.lookup(key),
        }
    }

    /// Like [`RadixTree::fetch`], but report a missing key as [`Error::KeyNotFound`].
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, i32> = RadixTree::new();
    /// let err = t.try_fetch(&"101".parse()?, Match::Longest).unwrap_err();
    /// assert_eq!(err.to_string(), "key not found: 0b101/3");
    /// # Ok(())
    /// # }
    /// ```
    pub fn try_fetch(&self, key: &K, mode: Match) -> Result<(&K, &V), Error>
    where
        K: Debug,
    {
        self.fetch(key, mode)
            .ok_or_else(|| Error::KeyNotFound(format!("{key:?}")))
    }
}

impl<K, V> RadixTree<K, V>
where
    K: Key,
    V: Clone,
{
    /// Remove the entry matching `key` (exactly, or by longest prefix match). Returns the removed
    /// pair, and the tree without it. If nothing matches, the tree is returned unchanged.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new().put("10".parse()?, 1);
    /// let (pair, rest) = t.pop(&"1011".parse()?, Match::Longest);
    /// assert_eq!(pair, Some(("10".parse()?, 1)));
    /// assert!(rest.is_empty());
    /// let (pair, rest) = t.pop(&"1011".parse()?, Match::Exact);
    /// assert_eq!(pair, None);
    /// assert_eq!(rest, t);
    /// # Ok(())
    /// # }
    /// ```
    pub fn pop(&self, key: &K, mode: Match) -> (Option<(K, V)>, Self) {
        let found = match mode {
            Match::Exact => self.remove_entry(key),
            Match::Longest => self
                .lookup(key)
                .and_then(|(k, _)| self.remove_entry(k)),
        };
        match found {
            Some((tree, pair)) => (Some(pair), tree),
            None => (None, self.clone()),
        }
    }

    /// Replace the value of the longest prefix match of `key` by `f(old_value)`. If no stored
    /// key is a prefix of `key`, `(key, default)` is inserted instead.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new().put("10".parse()?, 1);
    /// let t = t.update("1011".parse()?, 0, |v| v + 10);
    /// assert_eq!(t.get(&"10".parse()?), Some(&11));
    /// let t = t.update("0".parse()?, 0, |v| v + 10);
    /// assert_eq!(t.get(&"0".parse()?), Some(&0));
    /// # Ok(())
    /// # }
    /// ```
    pub fn update<F>(&self, key: K, default: V, f: F) -> Self
    where
        F: FnOnce(&V) -> V,
    {
        match self.lookup(&key) {
            Some((k, v)) => {
                let (k, v) = (k.clone(), f(v));
                self.put(k, v)
            }
            None => self.put(key, default),
        }
    }

    /// Look up `key` exactly, and let `f` decide, based on the current entry, whether to store a
    /// new value or to remove the key. Returns the result chosen by `f` and the new tree.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::new().put("10".parse()?, 1);
    /// let (old, t) = t.get_and_update("10".parse()?, |e| {
    ///     let old = e.map(|(_, v)| *v);
    ///     Action::Replace(old, old.unwrap_or(0) + 1)
    /// });
    /// assert_eq!(old, Some(1));
    /// assert_eq!(t.get(&"10".parse()?), Some(&2));
    /// let (old, t) = t.get_and_update("10".parse()?, |e| Action::Pop(e.map(|(_, v)| *v)));
    /// assert_eq!(old, Some(2));
    /// assert!(t.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_and_update<R, F>(&self, key: K, f: F) -> (R, Self)
    where
        F: FnOnce(Option<(&K, &V)>) -> Action<R, V>,
    {
        match f(self.get_key_value(&key)) {
            Action::Replace(result, value) => (result, self.put(key, value)),
            Action::Pop(result) => (result, self.delete(&key)),
        }
    }

    /// Fold all entries of `other` into `self`, overwriting the values of keys present in both.
    pub fn merge(&self, other: &Self) -> Self {
        self.merge_with(other, |_, _, v| v.clone())
    }

    /// Fold all entries of `other` into `self`. Keys present in both get the value
    /// `f(key, self_value, other_value)`.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let a: RadixTree<Bits, _> = RadixTree::from_pairs([("0".parse()?, 1), ("1".parse()?, 2)]);
    /// let b: RadixTree<Bits, _> = RadixTree::from_pairs([("1".parse()?, 10), ("11".parse()?, 20)]);
    /// let m = a.merge_with(&b, |_, x, y| x + y);
    /// assert_eq!(m.values().collect::<Vec<_>>(), vec![&1, &12, &20]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge_with<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(&K, &V, &V) -> V,
    {
        let merged = other.iter().fold(self.clone(), |tree, (k, theirs)| {
            let value = match tree.get(k) {
                Some(ours) => f(k, ours, theirs),
                None => theirs.clone(),
            };
            tree.put(k.clone(), value)
        });
        debug!(
            left = self.len(),
            right = other.len(),
            merged = merged.len(),
            "merged trees"
        );
        merged
    }

    /// Split the tree into the entries matching `keys` (exactly, or by longest prefix match) and
    /// the remaining ones.
    ///
    /// ```
    /// # use patricia_bits::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RadixTree<Bits, _> = RadixTree::from_pairs([
    ///     ("0".parse()?, 1),
    ///     ("10".parse()?, 2),
    ///     ("11".parse()?, 3),
    /// ]);
    /// let (taken, rest) = t.split(["100".parse::<Bits>()?], Match::Longest);
    /// assert_eq!(taken.keys().collect::<Vec<_>>(), vec![&"10".parse::<Bits>()?]);
    /// assert_eq!(rest.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn split<I>(&self, keys: I, mode: Match) -> (Self, Self)
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let taken = self.take(keys, mode);
        let rest = taken.keys().fold(self.clone(), |tree, k| tree.delete(k));
        debug!(taken = taken.len(), rest = rest.len(), "split tree");
        (taken, rest)
    }

    /// A tree with only the entries matching `keys` (exactly, or by longest prefix match).
    pub fn take<I>(&self, keys: I, mode: Match) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        keys.into_iter()
            .fold(Self::new(), |tree, key| match self.fetch(key.borrow(), mode) {
                Some((k, v)) => tree.put(k.clone(), v.clone()),
                None => tree,
            })
    }

    /// A tree without the given `keys`. Keys that are not stored are ignored.
    pub fn drop<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        keys.into_iter()
            .fold(self.clone(), |tree, key| tree.delete(key.borrow()))
    }
}

//! This crate provides a persistent, path-compressed binary radix tree (a Patricia tree) whose
//! keys are sequences of bits of arbitrary length. Besides exact lookups, it answers
//! longest-prefix match queries, and finds all stored keys that are less or more specific than a
//! given key. Keys are either [`Bits`] (an owned bit string of any length), tuples `(R, u8)` of an
//! unsigned primitive integer `R` and a length, or IP networks from
//! [ipnet](https://docs.rs/ipnet/2.10.0) or [ipnetwork](https://crates.io/crates/ipnetwork).
//!
//! ```
//! # use patricia_bits::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let t: RadixTree<Bits, _> = RadixTree::new()
//!     .put(Bits::from([1, 1, 1]), "A")
//!     .put(Bits::from_bytes_len(&[1, 1, 1, 0x00], 25), "B")
//!     .put(Bits::from_bytes_len(&[1, 1, 1, 0x80], 25), "C");
//! assert_eq!(t.lookup(&Bits::from([1, 1, 1, 255])).map(|(_, v)| *v), Some("C"));
//! assert_eq!(t.lookup(&Bits::from([1, 1, 1, 0])).map(|(_, v)| *v), Some("B"));
//! assert_eq!(t.lookup(&Bits::from([1, 1, 1])).map(|(_, v)| *v), Some("A"));
//! assert_eq!(t.lookup(&Bits::from([1, 1, 2])), None);
//! # Ok(())
//! # }
//! ```
//!
//! # Description of the Tree
//!
//! The tree consists of branches and leaves. A branch has a bit position and two children; all
//! keys with that bit set live in the right child, all others in the left one. Every position
//! beyond the length of a key reads as a zero bit (*virtual-zero extension*). Therefore, keys
//! that only differ in trailing zero bits (e.g., `1`, `10` and `100`) cannot be told apart by any
//! branch. They share one leaf, which holds them ordered from the longest to the shortest key.
//! Branches only exist at positions that separate stored keys (path compression), so no branch
//! has an empty child. The only exception is the root, a branch at bit 0 that stays in place even
//! if one or both of its sides are empty.
//!
//! # Persistence
//!
//! All modifying operations take `&self` and return a new tree. Nodes are reference counted, and
//! the new tree shares every subtree that the modification did not touch with the old one.
//! Keeping old versions around is thus cheap, and trees can be read from any number of threads
//! without synchronization. Concurrent writers need to serialize their updates themselves, and
//! may use [`RadixTree::merge_with`] to reconcile diverged trees.
//!
//! # Operations on the tree
//!
//! The following are the computational complexities of the functions, where `n` is the number of
//! elements in the tree, and `w` the number of bits in the key.
//!
//! | Operation                                    | Complexity     |
//! |----------------------------------------------|----------------|
//! | `get`, `contains_key`, `branch_point`        | `O(w)`         |
//! | `put`, `delete`                              | `O(w)`         |
//! | `lookup`, `less`, `fetch`, `pop`, `update`   | `O(w^2)`       |
//! | `more`                                       | `O(w + m)`     |
//! | `merge`, `split`, `take`, `drop`             | `O(k w^2)`     |
//! | `prune`, `adjacencies`                       | `O(n w)`       |
//! | `iter`, `reduce`, `walk`, `len`, `to_vec`    | `O(n)`         |
//! | `is_empty`                                   | `O(1)`         |
//!
//! Here, `m` is the number of matches of `more`, and `k` the number of keys passed to the bulk
//! operations. The prefix searches test at most `w` bits of the key. Whenever they fall back to
//! a shorter prefix, they follow a single left spine, which adds at most `w` nodes per fallback
//! and never depends on `n`. Leaves hold chains of keys that only differ in trailing zeros; a
//! long chain adds its length to the complexity of the point operations.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events for the bulk operations (`debug`) and for every combined
//! pair of siblings while pruning (`trace`). It never installs a subscriber.

#![deny(missing_docs)]

mod bits;
mod error;
mod fmt;
mod key;
mod node;
mod options;
mod prune;
mod tree;

#[cfg(test)]
mod fuzzing;

pub use bits::Bits;
pub use error::Error;
pub use key::Key;
pub use options::{Bound, Match, Order, Pruning};
pub use prune::{Adjacency, Combine, Siblings};
pub use tree::{Action, Iter, Keys, RadixTree, Values, Visit};

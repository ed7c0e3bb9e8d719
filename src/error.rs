//! Error types of the radix tree.

use thiserror::Error;

/// Errors reported by the radix tree and its keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bit string could not be parsed because of a character other than `0`, `1` or `_`.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit {
        /// Index of the offending digit (separators are not counted).
        position: usize,
        /// The offending character.
        found: char,
    },

    /// The strict accessor did not find a matching key.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The root of the tree is not a branch at bit 0.
    #[error("corrupt tree: root was replaced by a node at bit {0:?}")]
    RootReplaced(Option<usize>),

    /// A branch below the root has an empty child.
    #[error("corrupt tree: one-way branch at bit {bit}")]
    OneWayBranch {
        /// Bit position of the branch.
        bit: usize,
    },

    /// A branch is not strictly deeper than its parent branch.
    #[error("corrupt tree: branch at bit {child} below branch at bit {parent}")]
    UnorderedBranch {
        /// Bit position of the parent branch.
        parent: usize,
        /// Bit position of the child branch.
        child: usize,
    },

    /// A key is stored on the wrong side of one of its ancestor branches.
    #[error("corrupt tree: key {key} is on the wrong side of the branch at bit {bit}")]
    MisplacedKey {
        /// Rendering of the misplaced key.
        key: String,
        /// Bit position of the branch.
        bit: usize,
    },

    /// A leaf holds no entries; empty leaves are represented by their own state.
    #[error("corrupt tree: leaf without entries")]
    EmptyLeaf,

    /// The keys of a leaf are not ordered by strictly decreasing length.
    #[error("corrupt tree: leaf keys are not ordered by decreasing length")]
    UnorderedLeaf,

    /// Two keys of a leaf are not prefixes of one another.
    #[error("corrupt tree: leaf holds keys {0} and {1} that are not a prefix chain")]
    BrokenChain(String, String),
}

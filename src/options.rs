//! Options that select between the variants of an operation.

/// How a search key is matched against the stored keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Match {
    /// Only the identical key matches.
    #[default]
    Exact,
    /// The longest stored key that is a prefix of the search key matches.
    Longest,
}

/// Whether a range query includes the search key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    /// An exact match of the search key is part of the result.
    #[default]
    Inclusive,
    /// An exact match of the search key is left out.
    Exclusive,
}

/// How many pruning passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    /// A single pass over the tree.
    #[default]
    Once,
    /// Repeat passes until one does not combine any siblings.
    Recurse,
}

/// The order in which [`crate::RadixTree::walk`] visits the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// A branch before its children.
    #[default]
    Pre,
    /// A branch between its left and its right child.
    In,
    /// A branch after its children.
    Post,
}

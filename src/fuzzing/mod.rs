//! Module for testing using fuzzing (quickcheck)
#![allow(clippy::type_complexity)]

use std::collections::HashMap;
use std::fmt::Debug;

use crate::*;
use quickcheck::Arbitrary;

macro_rules! qc {
    ($name:ident, $f:ident) => {
        #[test]
        fn $name() {
            proptest_runner($f)
        }
    };
}

mod basic;
mod prune;
mod ranges;

#[derive(Debug, PartialEq, Clone)]
enum Operation<K, V> {
    Add(K, V),
    Remove(K),
}

#[cfg(miri)]
const DEFAULT_NUM_TESTS: usize = 10;
#[cfg(not(miri))]
const DEFAULT_NUM_TESTS: usize = 1000;
const DEFAULT_GEN_SIZE: usize = 100;

fn proptest_runner<A: Arbitrary + Debug + PartialEq, F: Fn(A) -> bool>(f: F) {
    let num_tests: usize = std::env::var("QUICKCHECK_TESTS")
        .ok()
        .and_then(|x| x.parse::<usize>().ok())
        .unwrap_or(DEFAULT_NUM_TESTS);

    let gen_size: usize = std::env::var("QUICKCHECK_GENERATOR_SIZE")
        .ok()
        .and_then(|x| x.parse::<usize>().ok())
        .unwrap_or(DEFAULT_GEN_SIZE);

    let mut gen = quickcheck::Gen::new(gen_size);

    for _ in 0..num_tests {
        let input = A::arbitrary(&mut gen);
        if !f(input.clone()) {
            shrink_failure(f, input)
        }
    }
}

fn shrink_failure<A: Arbitrary + Debug + PartialEq, F: Fn(A) -> bool>(f: F, input: A) -> ! {
    for i in input.shrink() {
        if !f(i.clone()) {
            shrink_failure(f, i)
        }
    }
    // all shrunken inputs pass, so `input` is minimal
    panic!(
        "[QUICKCHECK] Test case failed!\n  Minimal input:\n    {:?}",
        input
    );
}

/// The model every tree is compared against.
type Model = HashMap<Bits, i32>;

/// Apply all operations to both a tree and the model, checking the structure after each step.
fn build(ops: Vec<Operation<Bits, i32>>) -> Option<(RadixTree<Bits, i32>, Model)> {
    let mut tree = RadixTree::new();
    let mut model = HashMap::new();
    for op in ops {
        match op {
            Operation::Add(k, v) => {
                tree = tree.put(k.clone(), v);
                model.insert(k, v);
            }
            Operation::Remove(k) => {
                tree = tree.delete(&k);
                model.remove(&k);
            }
        }
        tree.validate().ok()?;
    }
    Some((tree, model))
}

/// Both sides as sorted lists of pairs.
fn same_entries(tree: &RadixTree<Bits, i32>, model: &Model) -> bool {
    let mut got = tree.to_vec();
    got.sort();
    let mut want: Vec<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
    want.sort();
    got == want
}

impl Arbitrary for Bits {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // short keys collide often, which is where chains and forks get exercised
        #[rustfmt::skip]
        let len: usize = *g
            .choose(&[
                0,
                1, 1,
                2, 2, 2,
                3, 3, 3, 3,
                4, 4, 4, 4, 4,
                5, 5, 5, 5, 5, 5,
                6, 6, 6, 6, 6, 6,
                7, 7, 7, 7, 7,
                8, 8, 8, 8,
                9, 9, 9,
                12, 12,
                17,
            ])
            .unwrap();
        (0..len).map(|_| bool::arbitrary(g)).collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self.parent() {
            None => quickcheck::empty_shrinker(),
            Some(parent) => quickcheck::single_shrinker(parent),
        }
    }
}

impl<K: Arbitrary, V: Arbitrary> Arbitrary for Operation<K, V> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let k = K::arbitrary(g);
        if g.choose(&[
            true, true, true, true, true, true, true, false, false, false,
        ])
        .copied()
        .unwrap_or_default()
        {
            Self::Add(k, V::arbitrary(g))
        } else {
            Self::Remove(k)
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Operation::Add(k, v) => {
                let v = v.clone();
                Box::new(k.shrink().map(move |k| Operation::Add(k, v.clone())))
            }
            Operation::Remove(k) => Box::new(k.shrink().map(Operation::Remove)),
        }
    }
}

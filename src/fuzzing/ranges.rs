use itertools::Itertools;

use super::*;

fn tree_and_model(list: Vec<(Bits, i32)>) -> (RadixTree<Bits, i32>, Model) {
    (RadixTree::from_pairs(list.clone()), list.into_iter().collect())
}

fn owned(result: Vec<(&Bits, &i32)>) -> Vec<(Bits, i32)> {
    result.into_iter().map(|(k, v)| (k.clone(), *v)).collect()
}

qc!(lookup, _lookup);
fn _lookup((list, queries): (Vec<(Bits, i32)>, Vec<Bits>)) -> bool {
    let (tree, model) = tree_and_model(list);
    queries.iter().chain(model.keys()).all(|q| {
        let want = model
            .iter()
            .filter(|(k, _)| k.is_prefix_of(q))
            .max_by_key(|(k, _)| k.len());
        tree.lookup(q) == want && tree.fetch(q, Match::Longest) == want
    })
}

qc!(less, _less);
fn _less((list, queries): (Vec<(Bits, i32)>, Vec<Bits>)) -> bool {
    let (tree, model) = tree_and_model(list);
    queries.iter().chain(model.keys()).all(|q| {
        let want = model
            .iter()
            .filter(|(k, _)| k.is_prefix_of(q))
            .map(|(k, v)| (k.clone(), *v))
            .sorted_by_key(|(k, _)| std::cmp::Reverse(k.len()))
            .collect_vec();
        let inclusive = owned(tree.less(q, Bound::Inclusive));
        let exclusive = owned(tree.less(q, Bound::Exclusive));
        // most specific first, so the order is fully determined
        inclusive == want
            && exclusive == want.iter().filter(|(k, _)| k != q).cloned().collect_vec()
    })
}

qc!(more, _more);
fn _more((list, queries): (Vec<(Bits, i32)>, Vec<Bits>)) -> bool {
    let (tree, model) = tree_and_model(list);
    queries.iter().chain(model.keys()).all(|q| {
        let want = model
            .iter()
            .filter(|(k, _)| q.is_prefix_of(k))
            .map(|(k, v)| (k.clone(), *v))
            .sorted()
            .collect_vec();
        let inclusive = owned(tree.more(q, Bound::Inclusive)).into_iter().sorted().collect_vec();
        let exclusive = owned(tree.more(q, Bound::Exclusive)).into_iter().sorted().collect_vec();
        inclusive == want
            && exclusive == want.iter().filter(|(k, _)| k != q).cloned().collect_vec()
    })
}

qc!(branch_point, _branch_point);
fn _branch_point((list, key): (Vec<(Bits, i32)>, Bits)) -> bool {
    let (tree, _) = tree_and_model(list);
    let added = tree.put(key.clone(), 0);
    match tree.branch_point(&key) {
        // joining an existing leaf (or an empty side) never adds a branch
        None => branches(&added) == branches(&tree),
        Some(bit) => {
            branches(&added) == branches(&tree) + 1
                && added.walk(false, Order::Pre, |found, v| {
                    found || matches!(v, Visit::Branch { bit: b } if b == bit)
                })
        }
    }
}

fn branches(tree: &RadixTree<Bits, i32>) -> usize {
    tree.walk(0, Order::Post, |n, v| match v {
        Visit::Branch { .. } => n + 1,
        Visit::Leaf(_) => n,
    })
}

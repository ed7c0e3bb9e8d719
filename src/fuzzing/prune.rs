use super::*;

fn total(tree: &RadixTree<Bits, i32>) -> i32 {
    tree.reduce(0i32, |acc, _, v| acc.wrapping_add(*v))
}

fn sum(s: &Siblings<'_, Bits, i32>) -> Combine<i32> {
    let parent = s.parent_value.copied().unwrap_or(0);
    Combine::Accept(s.left.1.wrapping_add(*s.right.1).wrapping_add(parent))
}

/// Naive adjacency discovery on the model.
fn adjacent(model: &Model) -> Vec<(Bits, Adjacency<Bits, i32>)> {
    let mut result: Vec<_> = model
        .iter()
        .filter_map(|(k2, v2)| {
            let last = k2.len().checked_sub(1)?;
            if !k2.is_bit_set(last) {
                return None;
            }
            let k1 = k2.sibling()?;
            let v1 = *model.get(&k1)?;
            let k0 = k2.parent()?;
            let parent = model.get(&k0).copied();
            let adjacency = Adjacency {
                left: (k1, v1),
                right: (k2.clone(), *v2),
                parent,
            };
            Some((k0, adjacency))
        })
        .collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

qc!(adjacencies, _adjacencies);
fn _adjacencies(list: Vec<(Bits, i32)>) -> bool {
    let tree = RadixTree::from_pairs(list.clone());
    let model: Model = list.into_iter().collect();
    let mut got = tree.adjacencies().to_vec();
    got.sort_by(|a, b| a.0.cmp(&b.0));
    got == adjacent(&model)
}

qc!(prune_keeps_total, _prune_keeps_total);
fn _prune_keeps_total(list: Vec<(Bits, i32)>) -> bool {
    let tree = RadixTree::from_pairs(list);
    let once = tree.prune(sum, Pruning::Once);
    let all = tree.prune(sum, Pruning::Recurse);
    once.validate().is_ok()
        && all.validate().is_ok()
        && total(&once) == total(&tree)
        && total(&all) == total(&tree)
        && once.len() <= tree.len()
        && all.len() <= once.len()
}

qc!(prune_recurse_is_final, _prune_recurse_is_final);
fn _prune_recurse_is_final(list: Vec<(Bits, i32)>) -> bool {
    let all = RadixTree::from_pairs(list).prune(sum, Pruning::Recurse);
    all.adjacencies().is_empty() && all.prune(sum, Pruning::Once) == all
}

qc!(prune_reject, _prune_reject);
fn _prune_reject(list: Vec<(Bits, i32)>) -> bool {
    let tree = RadixTree::from_pairs(list);
    let mut calls = 0;
    let pruned = tree.prune(
        |_| {
            calls += 1;
            Combine::Reject
        },
        Pruning::Recurse,
    );
    pruned == tree && calls == tree.adjacencies().len()
}

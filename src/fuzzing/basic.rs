use itertools::Itertools;

use super::*;

qc!(new, _new);
fn _new(list: Vec<(Bits, i32)>) -> bool {
    let tree = RadixTree::from_pairs(list.clone());
    let model: Model = list.into_iter().collect();
    tree.validate().is_ok() && same_entries(&tree, &model) && tree.len() == model.len()
}

qc!(new_mods, _new_mods);
fn _new_mods(list: Vec<Operation<Bits, i32>>) -> bool {
    match build(list) {
        Some((tree, model)) => {
            same_entries(&tree, &model) && tree.is_empty() == model.is_empty()
        }
        None => false,
    }
}

qc!(get, _get);
fn _get((list, queries): (Vec<Operation<Bits, i32>>, Vec<Bits>)) -> bool {
    let Some((tree, model)) = build(list) else {
        return false;
    };
    model
        .keys()
        .chain(queries.iter())
        .all(|k| tree.get(k) == model.get(k) && tree.contains_key(k) == model.contains_key(k))
}

qc!(round_trip, _round_trip);
fn _round_trip((list, key, value): (Vec<(Bits, i32)>, Bits, i32)) -> bool {
    let tree = RadixTree::from_pairs(list);
    let added = tree.put(key.clone(), value);
    let removed = added.delete(&key);
    added.get(&key) == Some(&value)
        && removed.get(&key).is_none()
        && removed.validate().is_ok()
        && removed.len() == added.len() - 1
}

qc!(persistence, _persistence);
fn _persistence(list: Vec<Operation<Bits, i32>>) -> bool {
    let mut tree = RadixTree::new();
    let mut model = HashMap::new();
    let mut history = Vec::new();
    for op in list {
        history.push((tree.clone(), model.clone()));
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
    }
    history.iter().all(|(t, m)| same_entries(t, m))
}

qc!(equality, _equality);
fn _equality(list: Vec<Operation<Bits, i32>>) -> bool {
    let Some((tree, _)) = build(list) else {
        return false;
    };
    let reversed = RadixTree::from_pairs(tree.to_vec().into_iter().rev());
    tree == reversed && format!("{tree:?}") == format!("{reversed:?}")
}

/// The key without trailing zero bits, i.e., the part that decides its place in the tree.
fn strip_zeros(k: &Bits) -> Bits {
    let len = (0..k.len()).rev().find(|&i| k.is_bit_set(i)).map_or(0, |i| i + 1);
    k.truncate(len)
}

qc!(iteration_order, _iteration_order);
fn _iteration_order(list: Vec<(Bits, i32)>) -> bool {
    let tree = RadixTree::from_pairs(list);
    let keys = tree.keys().collect_vec();
    let sorted = keys
        .iter()
        .copied()
        .sorted_by(|a, b| strip_zeros(a).cmp(&strip_zeros(b)).then(b.len().cmp(&a.len())))
        .collect_vec();
    keys == sorted
        && tree.reduce(0i64, |acc, _, v| acc + *v as i64)
            == tree.values().map(|v| *v as i64).sum::<i64>()
}

qc!(merge, _merge);
fn _merge((a, b): (Vec<(Bits, i32)>, Vec<(Bits, i32)>)) -> bool {
    let ta = RadixTree::from_pairs(a.clone());
    let tb = RadixTree::from_pairs(b.clone());
    let mut model: Model = a.into_iter().collect();
    for (k, v) in b.into_iter().collect::<Model>() {
        model
            .entry(k)
            .and_modify(|x| *x = x.wrapping_sub(v))
            .or_insert(v);
    }
    let merged = ta.merge_with(&tb, |_, x, y| x.wrapping_sub(*y));
    merged.validate().is_ok() && same_entries(&merged, &model)
}

qc!(split, _split);
fn _split((list, keys): (Vec<(Bits, i32)>, Vec<Bits>)) -> bool {
    let tree = RadixTree::from_pairs(list);
    let (taken, rest) = tree.split(&keys, Match::Exact);
    let disjoint = taken.keys().all(|k| !rest.contains_key(k));
    taken.len() + rest.len() == tree.len()
        && disjoint
        && taken.keys().all(|k| keys.iter().any(|x| x.eq_bits(k)))
        && rest.keys().all(|k| !keys.iter().any(|x| x.eq_bits(k)))
        && taken.merge(&rest) == tree
        && tree.drop(&keys) == rest
}

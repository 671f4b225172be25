//! Collection helpers with explicit ordering guarantees
//!
//! Reconciliation output must be reproducible run to run, so every helper here
//! documents how it treats ties and duplicates.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Sort ascending by an owned key.
///
/// The sort is stable: items with equal keys keep their input order.
pub fn order_by<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut keyed: Vec<(K, usize, T)> = items
        .into_iter()
        .enumerate()
        .map(|(position, item)| (key(&item), position, item))
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, _, item)| item).collect()
}

/// Drop every item whose key was already produced by an earlier item.
///
/// The first occurrence of each key survives and relative order is preserved.
pub fn uniq_by<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Index items by key. When keys collide the later item replaces the earlier.
pub fn key_by<T, K, F, I>(items: I, mut key: F) -> HashMap<K, T>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    items.into_iter().map(|item| (key(&item), item)).collect()
}

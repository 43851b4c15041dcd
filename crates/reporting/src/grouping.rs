//! Typed group-by reduction shared by the totals, breakdown and chart code.

use std::collections::HashMap;
use std::hash::Hash;

/// Fold `items` into one accumulator per key.
///
/// Each call site picks its own accumulator type: a plain revenue sum, a sum
/// plus a distinct-transaction set, and so on.
pub fn group_by<T, K, A, KeyFn, FoldFn>(
    items: impl IntoIterator<Item = T>,
    mut key_fn: KeyFn,
    mut fold: FoldFn,
) -> HashMap<K, A>
where
    K: Eq + Hash,
    A: Default,
    KeyFn: FnMut(&T) -> K,
    FoldFn: FnMut(&mut A, T),
{
    let mut groups: HashMap<K, A> = HashMap::new();
    for item in items {
        let acc = groups.entry(key_fn(&item)).or_default();
        fold(acc, item);
    }
    groups
}

//! Map merge engine.
//!
//! Two flavours:
//!
//! - [`merge_maps`] - a full outer merge of two independently built maps with a
//!   3-ary function `(key, left, right) -> Option<result>`. The function runs
//!   for **every** key in the union, with `None` for the missing side, and a
//!   `None` result drops the key.
//! - [`merge_with`] / [`merge_into`] - the same-type merger used as the
//!   cross-partition step of map-building reducers: a key present on one side
//!   is carried through unchanged and the binary function only runs on real
//!   collisions, as `f(left, right)`.
//!
//! ```
//! use keyfold::merge::{merge_maps, merge_with};
//! use std::collections::HashMap;
//!
//! let left = HashMap::from([("a", 1), ("b", 2)]);
//! let right = HashMap::from([("b", 3), ("c", 4)]);
//!
//! let summed = merge_with(left.clone(), right.clone(), |x, y| x + y);
//! assert_eq!(summed, HashMap::from([("a", 1), ("b", 5), ("c", 4)]));
//!
//! // Inner-join semantics: keep only keys present on both sides.
//! let both = merge_maps(left, right, |_k, l, r| Some((l?, r?)));
//! assert_eq!(both, HashMap::from([("b", (2, 3))]));
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

/// Outer-merge `left` and `right` into a new map.
///
/// `f` is called once per key in the union of both key sets. Keys for which
/// `f` returns `None` are left out, so the result never stores absent values.
/// Keys only in `left` are visited first (in `left`'s iteration order), then
/// keys only in `right`.
pub fn merge_maps<K, V, W, R, F>(
    left: HashMap<K, V>,
    mut right: HashMap<K, W>,
    mut f: F,
) -> HashMap<K, R>
where
    K: Eq + Hash,
    F: FnMut(&K, Option<V>, Option<W>) -> Option<R>,
{
    let mut out = HashMap::with_capacity(left.len().max(right.len()));
    for (k, v) in left {
        let w = right.remove(&k);
        if let Some(r) = f(&k, Some(v), w) {
            out.insert(k, r);
        }
    }
    for (k, w) in right {
        if let Some(r) = f(&k, None, Some(w)) {
            out.insert(k, r);
        }
    }
    out
}

/// Fallible [`merge_maps`]: the first error from `f` aborts the merge and is
/// returned as [`Error::Caller`](crate::Error::Caller).
pub fn try_merge_maps<K, V, W, R, F>(
    left: HashMap<K, V>,
    mut right: HashMap<K, W>,
    mut f: F,
) -> Result<HashMap<K, R>>
where
    K: Eq + Hash,
    F: FnMut(&K, Option<V>, Option<W>) -> anyhow::Result<Option<R>>,
{
    let mut out = HashMap::with_capacity(left.len().max(right.len()));
    for (k, v) in left {
        let w = right.remove(&k);
        if let Some(r) = f(&k, Some(v), w)? {
            out.insert(k, r);
        }
    }
    for (k, w) in right {
        if let Some(r) = f(&k, None, Some(w))? {
            out.insert(k, r);
        }
    }
    Ok(out)
}

/// Merge `right` into `left` and return it; collisions resolve to `f(left, right)`.
pub fn merge_with<K, V, F>(mut left: HashMap<K, V>, right: HashMap<K, V>, f: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    F: Fn(V, V) -> V,
{
    merge_into(&mut left, right, f);
    left
}

/// In-place form of [`merge_with`].
pub fn merge_into<K, V, F>(acc: &mut HashMap<K, V>, other: HashMap<K, V>, f: F)
where
    K: Eq + Hash,
    F: Fn(V, V) -> V,
{
    if acc.is_empty() {
        *acc = other;
        return;
    }
    for (k, v) in other {
        insert_merging(acc, k, v, &f);
    }
}

/// Fallible [`merge_into`].
///
/// `f` borrows both colliding values. Every collision is resolved before
/// `acc` is written, so when `f` fails `acc` is exactly as it was.
pub fn try_merge_into<K, V, F>(acc: &mut HashMap<K, V>, other: HashMap<K, V>, f: F) -> Result<()>
where
    K: Eq + Hash,
    F: Fn(&V, &V) -> anyhow::Result<V>,
{
    let mut staged = Vec::with_capacity(other.len());
    for (k, v) in other {
        let merged = match acc.get(&k) {
            Some(old) => f(old, &v)?,
            None => v,
        };
        staged.push((k, merged));
    }
    acc.extend(staged);
    Ok(())
}

/// Insert `v` under `k`, resolving a collision with `f(existing, v)`.
pub(crate) fn insert_merging<K, V, F>(acc: &mut HashMap<K, V>, k: K, v: V, f: &F)
where
    K: Eq + Hash,
    F: Fn(V, V) -> V,
{
    match acc.remove_entry(&k) {
        Some((k, old)) => {
            acc.insert(k, f(old, v));
        }
        None => {
            acc.insert(k, v);
        }
    }
}

/// Insert `v` under `k`, failing with [`Error::DuplicateKey`] if `k` is taken.
/// The map is left untouched on failure.
pub(crate) fn insert_unique<K, V>(acc: &mut HashMap<K, V>, k: K, v: V) -> Result<()>
where
    K: Eq + Hash + Debug,
{
    match acc.entry(k) {
        Entry::Occupied(e) => Err(Error::DuplicateKey {
            key: format!("{:?}", e.key()),
        }),
        Entry::Vacant(e) => {
            e.insert(v);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_maps_sees_missing_sides_as_none() {
        let left = HashMap::from([("a", 1), ("b", 2)]);
        let right = HashMap::from([("b", 30), ("c", 40)]);
        let mut seen = Vec::new();
        let out = merge_maps(left, right, |k, l, r| {
            seen.push((*k, l, r));
            Some(l.unwrap_or(0) + r.unwrap_or(0))
        });
        seen.sort();
        assert_eq!(
            seen,
            vec![("a", Some(1), None), ("b", Some(2), Some(30)), ("c", None, Some(40))]
        );
        assert_eq!(out, HashMap::from([("a", 1), ("b", 32), ("c", 40)]));
    }

    #[test]
    fn merge_maps_drops_keys_mapped_to_none() {
        let left = HashMap::from([(1, "x"), (2, "y")]);
        let right: HashMap<i32, &str> = HashMap::from([(2, "z")]);
        let out = merge_maps(left, right, |_, l, r| r.or(l).filter(|s| *s != "x"));
        assert_eq!(out, HashMap::from([(2, "z")]));
    }

    #[test]
    fn merge_with_only_calls_f_on_collisions() {
        let left = HashMap::from([("a", 1), ("b", 2)]);
        let right = HashMap::from([("b", 3), ("c", 4)]);
        let out = merge_with(left, right, |l, r| {
            assert_eq!((l, r), (2, 3));
            l + r
        });
        assert_eq!(out, HashMap::from([("a", 1), ("b", 5), ("c", 4)]));
    }

    #[test]
    fn try_merge_maps_stops_at_first_error() {
        let left = HashMap::from([("a", 1)]);
        let right = HashMap::from([("a", 2)]);
        let refuse = |_: &&str, _: Option<i32>, _: Option<i32>| -> anyhow::Result<Option<i32>> {
            anyhow::bail!("refused")
        };
        let err = try_merge_maps(left, right, refuse).unwrap_err();
        assert_eq!(err.to_string(), "refused");
    }

    #[test]
    fn insert_unique_reports_the_colliding_key() {
        let mut m = HashMap::new();
        assert!(insert_unique(&mut m, "k", 1).is_ok());
        match insert_unique(&mut m, "k", 2) {
            Err(Error::DuplicateKey { key }) => assert_eq!(key, "\"k\""),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
        assert_eq!(m, HashMap::from([("k", 1)]));
    }

    #[test]
    fn try_merge_into_leaves_acc_untouched_on_error() {
        let mut acc = HashMap::from([("a", 1), ("b", 2), ("c", 3)]);
        let other = HashMap::from([("b", 20), ("c", 30), ("d", 40)]);
        let err = try_merge_into(&mut acc, other, |l: &i32, r: &i32| {
            if *l == 3 {
                anyhow::bail!("refuse {l}+{r}")
            }
            Ok(l + r)
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "refuse 3+30");
        assert_eq!(acc, HashMap::from([("a", 1), ("b", 2), ("c", 3)]));
    }

    #[test]
    fn try_merge_into_merges_collisions_and_carries_the_rest() -> Result<()> {
        let mut acc = HashMap::from([("a", 1), ("b", 2)]);
        try_merge_into(&mut acc, HashMap::from([("b", 20), ("c", 3)]), |l, r| Ok(l + r))?;
        assert_eq!(acc, HashMap::from([("a", 1), ("b", 22), ("c", 3)]));
        Ok(())
    }
}

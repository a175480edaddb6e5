//! One-call aggregations over any iterable source.
//!
//! Each function takes the source, the pure function slots it needs and the
//! caller's `parallel` flag, builds the matching reducer from
//! [`reducers`](crate::reducers) and runs it with [`Runner::for_hint`].
//! Use the reducers directly for nesting beyond two levels or custom
//! downstreams, and a [`Runner`] directly to pick partition or thread counts.
//!
//! A [`Sequence`](crate::Sequence) is also a valid source; its own parallel
//! hint is ignored here in favour of the `parallel` argument.
//!
//! ```
//! use keyfold::ops;
//!
//! let words = ["apple", "avocado", "banana", "blueberry", "cherry"];
//! let by_letter = ops::group_by(words, |w| w.chars().next(), true)?;
//! assert_eq!(by_letter[&Some('b')], vec!["banana", "blueberry"]);
//!
//! let csv = ops::join(1..=3, ",", false)?;
//! assert_eq!(csv, "1,2,3");
//! # Ok::<_, keyfold::Error>(())
//! ```

use crate::error::Result;
use crate::reducer::Reducer;
use crate::reducers::{
    Joining, counting, grouping_by, to_list as to_list_reducer, to_map as to_map_reducer,
    to_map_unique as to_map_unique_reducer, to_set as to_set_reducer, to_vec, try_grouping_by,
};
use crate::runner::Runner;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

fn run<T, I, R>(source: I, parallel: bool, reducer: &R) -> Result<R::Output>
where
    I: IntoIterator<Item = T>,
    T: Send,
    R: Reducer<T>,
{
    Runner::for_hint(parallel).run(source.into_iter().collect(), reducer)
}

/// Group elements by `classifier`, keeping source order inside each bucket.
///
/// Return `Option<K>` from the classifier to get a `None` bucket for elements
/// without a key.
pub fn group_by<T, K, I, F>(
    source: I,
    classifier: F,
    parallel: bool,
) -> Result<HashMap<K, Vec<T>>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K: Eq + Hash + Send,
    F: Fn(&T) -> K + Send + Sync,
{
    run(source, parallel, &grouping_by(classifier, to_vec()))
}

/// [`group_by`] with a fallible classifier; the first error aborts the call.
pub fn try_group_by<T, K, I, F>(
    source: I,
    classifier: F,
    parallel: bool,
) -> Result<HashMap<K, Vec<T>>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K: Eq + Hash + Send,
    F: Fn(&T) -> anyhow::Result<K> + Send + Sync,
{
    run(source, parallel, &try_grouping_by(classifier, to_vec()))
}

/// Group elements by `classifier` and reduce every bucket with `downstream`.
pub fn group_by_with<T, K, I, F, D>(
    source: I,
    classifier: F,
    downstream: D,
    parallel: bool,
) -> Result<HashMap<K, D::Output>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K: Eq + Hash + Send,
    F: Fn(&T) -> K + Send + Sync,
    D: Reducer<T>,
{
    run(source, parallel, &grouping_by(classifier, downstream))
}

/// Two-level grouping: by `first`, then by `second` inside every bucket.
pub fn group_by2<T, K1, K2, I, F1, F2>(
    source: I,
    first: F1,
    second: F2,
    parallel: bool,
) -> Result<HashMap<K1, HashMap<K2, Vec<T>>>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K1: Eq + Hash + Send,
    K2: Eq + Hash + Send,
    F1: Fn(&T) -> K1 + Send + Sync,
    F2: Fn(&T) -> K2 + Send + Sync,
{
    run(source, parallel, &grouping_by(first, grouping_by(second, to_vec())))
}

/// Number of elements per key.
pub fn count_by<T, K, I, F>(source: I, classifier: F, parallel: bool) -> Result<HashMap<K, u64>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K: Eq + Hash + Send,
    F: Fn(&T) -> K + Send + Sync,
{
    run(source, parallel, &grouping_by(classifier, counting()))
}

/// Build a map; `merge(existing, new)` resolves every key collision.
pub fn to_map<T, K, V, I, KF, VF, MF>(
    source: I,
    key: KF,
    value: VF,
    merge: MF,
    parallel: bool,
) -> Result<HashMap<K, V>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K: Eq + Hash + Send,
    V: Send,
    KF: Fn(&T) -> K + Send + Sync,
    VF: Fn(T) -> V + Send + Sync,
    MF: Fn(V, V) -> V + Send + Sync,
{
    run(source, parallel, &to_map_reducer(key, value, merge))
}

/// Build a map from keys expected to be unique.
///
/// # Errors
/// [`Error::DuplicateKey`](crate::Error::DuplicateKey) on the first collision.
pub fn to_map_unique<T, K, V, I, KF, VF>(
    source: I,
    key: KF,
    value: VF,
    parallel: bool,
) -> Result<HashMap<K, V>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    K: Eq + Hash + Debug + Send,
    V: Send,
    KF: Fn(&T) -> K + Send + Sync,
    VF: Fn(T) -> V + Send + Sync,
{
    run(source, parallel, &to_map_unique_reducer(key, value))
}

/// Transform every element, dropping `None`, in source order.
pub fn to_list<T, U, I, F>(source: I, f: F, parallel: bool) -> Result<Vec<U>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    U: Send,
    F: Fn(T) -> Option<U> + Send + Sync,
{
    run(source, parallel, &to_list_reducer(f))
}

/// Transform every element into a set, dropping `None`.
pub fn to_set<T, U, I, F>(source: I, f: F, parallel: bool) -> Result<HashSet<U>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    U: Eq + Hash + Send,
    F: Fn(T) -> Option<U> + Send + Sync,
{
    run(source, parallel, &to_set_reducer(f))
}

/// Join the `ToString` form of every element with `delimiter`.
pub fn join<T, I>(source: I, delimiter: &str, parallel: bool) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: ToString + Send,
{
    join_with(source, delimiter, "", "", T::to_string, parallel)
}

/// Join `stringify(element)` with `delimiter` and wrap the result in `prefix`/`suffix`.
pub fn join_with<T, I, F>(
    source: I,
    delimiter: &str,
    prefix: &str,
    suffix: &str,
    stringify: F,
    parallel: bool,
) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Send,
    F: Fn(&T) -> String + Send + Sync,
{
    run(source, parallel, &Joining::new(delimiter, prefix, suffix, stringify))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn group_by2_nests_buckets() -> Result<()> {
        let rows = vec![(1, "x", 'A'), (1, "y", 'B'), (2, "x", 'A')];
        let out = group_by2(rows, |r| r.0, |r| r.1, true)?;
        assert_eq!(out.len(), 2);
        assert_eq!(out[&1]["x"], vec![(1, "x", 'A')]);
        assert_eq!(out[&1]["y"], vec![(1, "y", 'B')]);
        assert_eq!(out[&2].len(), 1);
        Ok(())
    }

    #[test]
    fn to_map_merges_and_unique_rejects() {
        let pairs = vec![("a", 1), ("b", 2), ("a", 3)];
        let summed =
            to_map(pairs.clone(), |p| p.0, |p| p.1, |x: i32, y: i32| x + y, false).unwrap();
        assert_eq!(summed, HashMap::from([("a", 4), ("b", 2)]));

        let err = to_map_unique(pairs, |p| p.0, |p| p.1, true).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { ref key } if key == "\"a\""), "{err}");
    }

    #[test]
    fn join_with_wraps_and_empty_is_bare() -> Result<()> {
        assert_eq!(join_with(Vec::<u8>::new(), ",", "[", "]", u8::to_string, true)?, "[]");
        let joined = join_with(vec![1u8, 2], "; ", "<", ">", |n| format!("#{n}"), false)?;
        assert_eq!(joined, "<#1; #2>");
        Ok(())
    }

    #[test]
    fn count_by_and_to_set() -> Result<()> {
        let counts = count_by(["a", "b", "a"], |s| *s, true)?;
        assert_eq!(counts, HashMap::from([("a", 2), ("b", 1)]));
        let evens = to_set(1..=6, |n| (n % 2 == 0).then_some(n), false)?;
        assert_eq!(evens, HashSet::from([2, 4, 6]));
        Ok(())
    }
}

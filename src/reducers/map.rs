//! Map-building reducers.
//!
//! Duplicate keys are never silently overwritten. [`to_map`] requires a merge
//! function up front; [`to_map_unique`] has none and fails the whole call with
//! [`Error::DuplicateKey`](crate::Error::DuplicateKey) on the first collision,
//! whether it happens inside a partition or while merging two partitions.

use crate::error::Result;
use crate::merge::{insert_merging, insert_unique, merge_into};
use crate::reducer::{Characteristics, Reducer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/* ===================== ToMap ===================== */

/// `key_fn(&item) -> value_fn(item)`, collisions resolved by `merge_fn(existing, new)`.
///
/// "Existing" is always the value from earlier in the source, so a
/// non-commutative `merge_fn` still gives the sequential answer in every mode.
#[derive(Clone, Copy, Debug)]
pub struct ToMap<KF, VF, MF> {
    key_fn: KF,
    value_fn: VF,
    merge_fn: MF,
}

pub fn to_map<T, K, V, KF, VF, MF>(key_fn: KF, value_fn: VF, merge_fn: MF) -> ToMap<KF, VF, MF>
where
    KF: Fn(&T) -> K + Send + Sync,
    VF: Fn(T) -> V + Send + Sync,
    MF: Fn(V, V) -> V + Send + Sync,
    K: Eq + Hash,
{
    ToMap {
        key_fn,
        value_fn,
        merge_fn,
    }
}

impl<T, K, V, KF, VF, MF> Reducer<T> for ToMap<KF, VF, MF>
where
    KF: Fn(&T) -> K + Send + Sync,
    VF: Fn(T) -> V + Send + Sync,
    MF: Fn(V, V) -> V + Send + Sync,
    K: Eq + Hash + Send,
    V: Send,
{
    type Acc = HashMap<K, V>;
    type Output = HashMap<K, V>;

    fn create(&self) -> HashMap<K, V> {
        HashMap::new()
    }

    fn add_input(&self, acc: &mut HashMap<K, V>, item: T) -> Result<()> {
        let k = (self.key_fn)(&item);
        let v = (self.value_fn)(item);
        insert_merging(acc, k, v, &self.merge_fn);
        Ok(())
    }

    fn merge(&self, acc: &mut HashMap<K, V>, other: HashMap<K, V>) -> Result<()> {
        merge_into(acc, other, &self.merge_fn);
        Ok(())
    }

    fn finish(&self, acc: HashMap<K, V>) -> Result<HashMap<K, V>> {
        Ok(acc)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH
    }
}

/* ===================== ToMapUnique ===================== */

/// Like [`ToMap`] without a merge function: any collision is an error.
#[derive(Clone, Copy, Debug)]
pub struct ToMapUnique<KF, VF> {
    key_fn: KF,
    value_fn: VF,
}

pub fn to_map_unique<T, K, V, KF, VF>(key_fn: KF, value_fn: VF) -> ToMapUnique<KF, VF>
where
    KF: Fn(&T) -> K + Send + Sync,
    VF: Fn(T) -> V + Send + Sync,
    K: Eq + Hash + Debug,
{
    ToMapUnique { key_fn, value_fn }
}

impl<T, K, V, KF, VF> Reducer<T> for ToMapUnique<KF, VF>
where
    KF: Fn(&T) -> K + Send + Sync,
    VF: Fn(T) -> V + Send + Sync,
    K: Eq + Hash + Debug + Send,
    V: Send,
{
    type Acc = HashMap<K, V>;
    type Output = HashMap<K, V>;

    fn create(&self) -> HashMap<K, V> {
        HashMap::new()
    }

    fn add_input(&self, acc: &mut HashMap<K, V>, item: T) -> Result<()> {
        let k = (self.key_fn)(&item);
        let v = (self.value_fn)(item);
        insert_unique(acc, k, v)
    }

    fn merge(&self, acc: &mut HashMap<K, V>, other: HashMap<K, V>) -> Result<()> {
        for (k, v) in other {
            insert_unique(acc, k, v)?;
        }
        Ok(())
    }

    fn finish(&self, acc: HashMap<K, V>) -> Result<HashMap<K, V>> {
        Ok(acc)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_UNORDERED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Runner;

    #[test]
    fn to_map_merges_in_source_order() -> Result<()> {
        let r = to_map(
            |p: &(char, &str)| p.0,
            |p: (char, &str)| p.1.to_string(),
            |a: String, b: String| a + &b,
        );
        let input = vec![('x', "1"), ('y', "2"), ('x', "3"), ('x', "4"), ('y', "5")];
        for runner in [Runner::sequential(), Runner::partitioned(2), Runner::partitioned(5)] {
            let out = runner.run(input.clone(), &r)?;
            assert_eq!(out, HashMap::from([('x', "134".to_string()), ('y', "25".to_string())]));
        }
        Ok(())
    }

    #[test]
    fn to_map_unique_fails_inside_and_across_partitions() {
        let r = to_map_unique(|s: &&str| s.len(), |s: &str| s.to_string());
        let input = vec!["aa", "b", "cc"];
        for runner in [Runner::sequential(), Runner::partitioned(3)] {
            let err = runner.run(input.clone(), &r).unwrap_err();
            assert!(err.is_duplicate_key(), "{err}");
            assert!(err.to_string().contains('2'));
        }
    }

    #[test]
    fn to_map_unique_accepts_distinct_keys() -> Result<()> {
        let r = to_map_unique(|n: &u32| n % 10, |n: u32| n);
        let out = Runner::partitioned(2).run(vec![11, 22, 33], &r)?;
        assert_eq!(out, HashMap::from([(1, 11), (2, 22), (3, 33)]));
        Ok(())
    }
}

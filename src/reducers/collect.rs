//! List and set conversion: map every element, drop the `None`s.

use crate::error::Result;
use crate::reducer::{Characteristics, Reducer};
use std::collections::HashSet;
use std::hash::Hash;

/* ===================== ToList ===================== */

/// Collect `f(item)` into a `Vec`, skipping items for which `f` returns `None`.
///
/// - Accumulator / output: `Vec<U>`
/// - Order: source order in every execution mode.
#[derive(Clone, Copy, Debug)]
pub struct ToList<F> {
    f: F,
}

/// List reducer over a filtering transform.
pub fn to_list<T, U, F>(f: F) -> ToList<F>
where
    F: Fn(T) -> Option<U> + Send + Sync,
{
    ToList { f }
}

/// Identity list reducer: collects every element as-is.
pub fn to_vec<T>() -> ToList<fn(T) -> Option<T>> {
    let f: fn(T) -> Option<T> = Some;
    ToList { f }
}

impl<T, U, F> Reducer<T> for ToList<F>
where
    F: Fn(T) -> Option<U> + Send + Sync,
    U: Send,
{
    type Acc = Vec<U>;
    type Output = Vec<U>;

    fn create(&self) -> Vec<U> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<U>, item: T) -> Result<()> {
        if let Some(u) = (self.f)(item) {
            acc.push(u);
        }
        Ok(())
    }

    fn merge(&self, acc: &mut Vec<U>, mut other: Vec<U>) -> Result<()> {
        acc.append(&mut other);
        Ok(())
    }

    fn finish(&self, acc: Vec<U>) -> Result<Vec<U>> {
        Ok(acc)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH
    }

    fn add_partition(&self, acc: &mut Vec<U>, items: Vec<T>) -> Result<()> {
        acc.extend(items.into_iter().filter_map(&self.f));
        Ok(())
    }
}

/* ===================== ToSet ===================== */

/// Collect `f(item)` into a `HashSet`, skipping `None`s. Duplicates collapse by `Eq`.
#[derive(Clone, Copy, Debug)]
pub struct ToSet<F> {
    f: F,
}

pub fn to_set<T, U, F>(f: F) -> ToSet<F>
where
    F: Fn(T) -> Option<U> + Send + Sync,
    U: Eq + Hash,
{
    ToSet { f }
}

/// Identity set reducer.
pub fn to_hash_set<T: Eq + Hash>() -> ToSet<fn(T) -> Option<T>> {
    let f: fn(T) -> Option<T> = Some;
    ToSet { f }
}

impl<T, U, F> Reducer<T> for ToSet<F>
where
    F: Fn(T) -> Option<U> + Send + Sync,
    U: Eq + Hash + Send,
{
    type Acc = HashSet<U>;
    type Output = HashSet<U>;

    fn create(&self) -> HashSet<U> {
        HashSet::new()
    }

    fn add_input(&self, acc: &mut HashSet<U>, item: T) -> Result<()> {
        if let Some(u) = (self.f)(item) {
            acc.insert(u);
        }
        Ok(())
    }

    fn merge(&self, acc: &mut HashSet<U>, other: HashSet<U>) -> Result<()> {
        if acc.len() < other.len() {
            let small = std::mem::replace(acc, other);
            acc.extend(small);
        } else {
            acc.extend(other);
        }
        Ok(())
    }

    fn finish(&self, acc: HashSet<U>) -> Result<HashSet<U>> {
        Ok(acc)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_UNORDERED
    }
}

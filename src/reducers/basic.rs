//! Small downstream building blocks: counting, summing, mapping, filtering.

use crate::error::Result;
use crate::reducer::{Characteristics, Reducer};
use std::mem::take;
use std::ops::Add;

/* ===================== Counting ===================== */

/// Number of elements (`u64`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Counting;

pub fn counting() -> Counting {
    Counting
}

impl<T> Reducer<T> for Counting {
    type Acc = u64;
    type Output = u64;

    fn create(&self) -> u64 {
        0
    }

    fn add_input(&self, acc: &mut u64, _item: T) -> Result<()> {
        *acc += 1;
        Ok(())
    }

    fn merge(&self, acc: &mut u64, other: u64) -> Result<()> {
        *acc += other;
        Ok(())
    }

    fn finish(&self, acc: u64) -> Result<u64> {
        Ok(acc)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_UNORDERED
    }

    fn add_partition(&self, acc: &mut u64, items: Vec<T>) -> Result<()> {
        *acc += items.len() as u64;
        Ok(())
    }
}

/* ===================== Summing ===================== */

/// Sum of `f(&item)`.
///
/// Requires `N: Add<Output = N> + Default`; the empty sum is `N::default()`.
#[derive(Clone, Copy, Debug)]
pub struct Summing<F> {
    f: F,
}

pub fn summing<T, N, F>(f: F) -> Summing<F>
where
    F: Fn(&T) -> N + Send + Sync,
    N: Add<Output = N> + Default,
{
    Summing { f }
}

impl<T, N, F> Reducer<T> for Summing<F>
where
    F: Fn(&T) -> N + Send + Sync,
    N: Add<Output = N> + Default + Send,
{
    type Acc = N;
    type Output = N;

    fn create(&self) -> N {
        N::default()
    }

    fn add_input(&self, acc: &mut N, item: T) -> Result<()> {
        *acc = take(acc) + (self.f)(&item);
        Ok(())
    }

    fn merge(&self, acc: &mut N, other: N) -> Result<()> {
        *acc = take(acc) + other;
        Ok(())
    }

    fn finish(&self, acc: N) -> Result<N> {
        Ok(acc)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH
    }
}

/* ===================== Mapping ===================== */

/// Apply `f` to each element before handing it to `downstream`.
#[derive(Clone, Copy, Debug)]
pub struct Mapping<F, D> {
    f: F,
    downstream: D,
}

pub fn mapping<T, U, F, D>(f: F, downstream: D) -> Mapping<F, D>
where
    F: Fn(T) -> U + Send + Sync,
    D: Reducer<U>,
{
    Mapping { f, downstream }
}

impl<T, U, F, D> Reducer<T> for Mapping<F, D>
where
    F: Fn(T) -> U + Send + Sync,
    D: Reducer<U>,
{
    type Acc = D::Acc;
    type Output = D::Output;

    fn create(&self) -> D::Acc {
        self.downstream.create()
    }

    fn add_input(&self, acc: &mut D::Acc, item: T) -> Result<()> {
        self.downstream.add_input(acc, (self.f)(item))
    }

    fn merge(&self, acc: &mut D::Acc, other: D::Acc) -> Result<()> {
        self.downstream.merge(acc, other)
    }

    fn finish(&self, acc: D::Acc) -> Result<D::Output> {
        self.downstream.finish(acc)
    }

    fn characteristics(&self) -> Characteristics {
        self.downstream.characteristics()
    }
}

/* ===================== Filtering ===================== */

/// Only hand elements matching `pred` to `downstream`.
///
/// Inside a grouping the bucket is still created for a rejected element, so
/// the key shows up with the downstream's empty result (e.g. an empty `Vec`).
#[derive(Clone, Copy, Debug)]
pub struct Filtering<P, D> {
    pred: P,
    downstream: D,
}

pub fn filtering<T, P, D>(pred: P, downstream: D) -> Filtering<P, D>
where
    P: Fn(&T) -> bool + Send + Sync,
    D: Reducer<T>,
{
    Filtering { pred, downstream }
}

impl<T, P, D> Reducer<T> for Filtering<P, D>
where
    P: Fn(&T) -> bool + Send + Sync,
    D: Reducer<T>,
{
    type Acc = D::Acc;
    type Output = D::Output;

    fn create(&self) -> D::Acc {
        self.downstream.create()
    }

    fn add_input(&self, acc: &mut D::Acc, item: T) -> Result<()> {
        if (self.pred)(&item) {
            self.downstream.add_input(acc, item)?;
        }
        Ok(())
    }

    fn merge(&self, acc: &mut D::Acc, other: D::Acc) -> Result<()> {
        self.downstream.merge(acc, other)
    }

    fn finish(&self, acc: D::Acc) -> Result<D::Output> {
        self.downstream.finish(acc)
    }

    fn characteristics(&self) -> Characteristics {
        self.downstream.characteristics()
    }
}

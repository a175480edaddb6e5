//! The reducer descriptor: the composable unit behind every aggregation.
//!
//! A [`Reducer<T>`] describes how to fold elements of type `T` into a result
//! in four steps:
//!
//! 1. [`create`](Reducer::create) - a fresh, empty container (`Acc`) owned by
//!    exactly one partition.
//! 2. [`add_input`](Reducer::add_input) - mutate the container with one element.
//! 3. [`merge`](Reducer::merge) - fold a container built by another partition
//!    into this one. The right-hand container is moved in, never shared.
//! 4. [`finish`](Reducer::finish) - turn the container into the visible `Output`.
//!
//! The runner relies on one law: for any finite input split into contiguous,
//! non-empty partitions that are merged left to right,
//! `finish(merge(acc(p0), acc(p1), ...))` equals `finish(acc(whole input))`.
//! Every reducer in [`crate::reducers`] satisfies it, which is what lets the
//! same descriptor run sequentially or in parallel.
//!
//! Steps 2-4 are fallible so that caller-supplied functions (a classifier
//! returning `anyhow::Result`, a duplicate-key check) can abort the whole call.
//!
//! # Example
//! ```
//! use keyfold::{Characteristics, Reducer, Result};
//!
//! /// Longest string seen.
//! struct Longest;
//!
//! impl Reducer<String> for Longest {
//!     type Acc = Option<String>;
//!     type Output = Option<String>;
//!
//!     fn create(&self) -> Self::Acc { None }
//!
//!     fn add_input(&self, acc: &mut Self::Acc, s: String) -> Result<()> {
//!         if acc.as_ref().is_none_or(|cur| s.len() > cur.len()) {
//!             *acc = Some(s);
//!         }
//!         Ok(())
//!     }
//!
//!     fn merge(&self, acc: &mut Self::Acc, other: Self::Acc) -> Result<()> {
//!         if let Some(s) = other {
//!             self.add_input(acc, s)?;
//!         }
//!         Ok(())
//!     }
//!
//!     fn finish(&self, acc: Self::Acc) -> Result<Self::Output> { Ok(acc) }
//!
//!     fn characteristics(&self) -> Characteristics { Characteristics::IDENTITY_FINISH }
//! }
//! ```

use crate::error::Result;

/// Optimization hints a reducer advertises about itself.
///
/// These never change results; they let callers and composite reducers skip
/// work or pick cheaper strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Characteristics {
    /// `finish` only moves the container out (`Acc == Output`).
    pub identity_finish: bool,
    /// The output does not depend on encounter order (sets, maps, counts).
    pub unordered: bool,
}

impl Characteristics {
    pub const NONE: Self = Self {
        identity_finish: false,
        unordered: false,
    };
    pub const IDENTITY_FINISH: Self = Self {
        identity_finish: true,
        unordered: false,
    };
    pub const UNORDERED: Self = Self {
        identity_finish: false,
        unordered: true,
    };
    pub const IDENTITY_UNORDERED: Self = Self {
        identity_finish: true,
        unordered: true,
    };

    /// Flags set in both `self` and `other`.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        Self {
            identity_finish: self.identity_finish && other.identity_finish,
            unordered: self.unordered && other.unordered,
        }
    }
}

/// A composable accumulate/merge/finish descriptor over elements of type `T`.
///
/// Implementations hold only configuration (closures, delimiters); all mutable
/// state lives in `Acc`, so a single reducer value can drive any number of
/// partitions concurrently.
pub trait Reducer<T>: Send + Sync {
    /// Intermediate container, exclusively owned by one partition.
    type Acc: Send;
    /// Externally visible result.
    type Output;

    /// Fresh, empty container.
    fn create(&self) -> Self::Acc;

    /// Fold one element into `acc`.
    fn add_input(&self, acc: &mut Self::Acc, item: T) -> Result<()>;

    /// Fold `other` (built from elements that come after `acc`'s) into `acc`.
    fn merge(&self, acc: &mut Self::Acc, other: Self::Acc) -> Result<()>;

    /// Turn the container into the visible result.
    fn finish(&self, acc: Self::Acc) -> Result<Self::Output>;

    /// Advisory flags; see [`Characteristics`].
    fn characteristics(&self) -> Characteristics {
        Characteristics::NONE
    }

    /// Fold a whole partition into `acc`.
    ///
    /// The default calls [`add_input`](Reducer::add_input) per element; reducers
    /// with a cheaper bulk path (e.g. `Vec::extend`) override it.
    fn add_partition(&self, acc: &mut Self::Acc, items: Vec<T>) -> Result<()> {
        for item in items {
            self.add_input(acc, item)?;
        }
        Ok(())
    }
}

/// Run `reducer` over `items` in one pass, on the calling thread.
///
/// This is the reference evaluation every other execution mode must agree with.
pub fn reduce_seq<T, R>(reducer: &R, items: impl IntoIterator<Item = T>) -> Result<R::Output>
where
    R: Reducer<T> + ?Sized,
{
    let mut acc = reducer.create();
    for item in items {
        reducer.add_input(&mut acc, item)?;
    }
    reducer.finish(acc)
}

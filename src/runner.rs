//! Execution engine: drives a [`Reducer`] over an owned `Vec<T>`.
//!
//! Three modes share one algorithm (accumulate per partition, merge partitions
//! left to right, finish once):
//!
//! - [`ExecMode::Sequential`] - a single partition on the calling thread.
//! - [`ExecMode::Partitioned`] - split into N partitions but still on the
//!   calling thread. Exercises the merge path deterministically.
//! - [`ExecMode::Parallel`] - partitions accumulated concurrently on a rayon
//!   pool (the global one, a dedicated one sized by `threads`, or one injected
//!   with [`Runner::with_pool`]).
//!
//! Merging is the only step that touches more than one container, and it
//! always moves the right container into the left one.

use crate::error::{Error, Result};
use crate::reducer::Reducer;
use log::{debug, trace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    Partitioned { partitions: usize },
    Parallel { threads: Option<usize>, partitions: Option<usize> },
}

/// Execution configuration.
///
/// `Runner::default()` is parallel on the global rayon pool with
/// `default_partitions` partitions; [`Runner::for_hint`] maps a caller's
/// "run in parallel" boolean onto a runner.
#[derive(Clone, Debug)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            default_partitions: 2 * num_cpus::get().max(2),
            pool: None,
        }
    }
}

impl Runner {
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Default::default()
        }
    }

    pub fn partitioned(partitions: usize) -> Self {
        Self {
            mode: ExecMode::Partitioned { partitions },
            ..Default::default()
        }
    }

    pub fn parallel(threads: Option<usize>, partitions: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel { threads, partitions },
            ..Default::default()
        }
    }

    /// Sequential for `false`, default parallel for `true`.
    pub fn for_hint(parallel: bool) -> Self {
        if parallel {
            Self::default()
        } else {
            Self::sequential()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    /// Partition count used when the mode does not pin one.
    #[must_use]
    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.default_partitions = partitions;
        self
    }

    /// Run parallel work on `pool` instead of the global rayon pool.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Reject zero thread or partition counts.
    pub fn validate(&self) -> Result<()> {
        if self.default_partitions == 0 {
            return Err(Error::invalid("default_partitions must be at least 1"));
        }
        match self.mode {
            ExecMode::Sequential => Ok(()),
            ExecMode::Partitioned { partitions: 0 }
            | ExecMode::Parallel {
                partitions: Some(0),
                ..
            } => Err(Error::invalid("partition count must be at least 1")),
            ExecMode::Parallel {
                threads: Some(0), ..
            } => Err(Error::invalid("thread count must be at least 1")),
            _ => Ok(()),
        }
    }

    /// Reduce `items` with `reducer` according to this runner's mode.
    ///
    /// The configuration is validated before any element is touched. The
    /// first error raised by the reducer aborts the call; no partial result
    /// escapes.
    pub fn run<T, R>(&self, items: Vec<T>, reducer: &R) -> Result<R::Output>
    where
        T: Send,
        R: Reducer<T> + ?Sized,
    {
        self.validate()?;
        let len = items.len();
        match self.mode {
            ExecMode::Sequential => {
                debug!("reducing {len} elements sequentially");
                let mut acc = reducer.create();
                reducer.add_partition(&mut acc, items)?;
                reducer.finish(acc)
            }
            ExecMode::Partitioned { partitions } => {
                let parts = split_vec(items, partitions);
                debug!(
                    "reducing {len} elements in {} partitions on the calling thread",
                    parts.len()
                );
                let accs = parts
                    .into_iter()
                    .map(|part| accumulate(reducer, part))
                    .collect::<Result<Vec<_>>>()?;
                reducer.finish(merge_in_order(reducer, accs)?)
            }
            ExecMode::Parallel { threads, partitions } => {
                let parts = split_vec(items, partitions.unwrap_or(self.default_partitions));
                debug!(
                    "reducing {len} elements in {} partitions in parallel (threads: {threads:?})",
                    parts.len()
                );
                let accs = match (&self.pool, threads) {
                    (Some(pool), _) => pool.install(|| accumulate_par(reducer, parts))?,
                    (None, Some(t)) => {
                        let pool = ThreadPoolBuilder::new()
                            .num_threads(t)
                            .build()
                            .map_err(|e| {
                                Error::invalid(format!("cannot build a {t}-thread pool: {e}"))
                            })?;
                        pool.install(|| accumulate_par(reducer, parts))?
                    }
                    (None, None) => accumulate_par(reducer, parts)?,
                };
                reducer.finish(merge_in_order(reducer, accs)?)
            }
        }
    }
}

fn accumulate<T, R>(reducer: &R, part: Vec<T>) -> Result<R::Acc>
where
    R: Reducer<T> + ?Sized,
{
    let mut acc = reducer.create();
    reducer.add_partition(&mut acc, part)?;
    Ok(acc)
}

fn accumulate_par<T, R>(reducer: &R, parts: Vec<Vec<T>>) -> Result<Vec<R::Acc>>
where
    T: Send,
    R: Reducer<T> + ?Sized,
{
    // Indexed collect keeps partition order.
    parts
        .into_par_iter()
        .map(|part| accumulate(reducer, part))
        .collect()
}

/// Fold partition containers left to right. An empty list yields `create()`.
fn merge_in_order<T, R>(reducer: &R, accs: Vec<R::Acc>) -> Result<R::Acc>
where
    R: Reducer<T> + ?Sized,
{
    let mut it = accs.into_iter();
    let mut acc = match it.next() {
        Some(first) => first,
        None => return Ok(reducer.create()),
    };
    for (i, other) in it.enumerate() {
        trace!("merging partition {} into the running container", i + 1);
        reducer.merge(&mut acc, other)?;
    }
    Ok(acc)
}

/// Split `v` into at most `n` contiguous, order-preserving chunks.
///
/// Inputs with fewer than two elements, or `n <= 1`, stay a single chunk (which
/// may be empty).
pub(crate) fn split_vec<T>(v: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let len = v.len();
    if n <= 1 || len <= 1 {
        return vec![v];
    }
    let chunk = len.div_ceil(n.min(len));
    let mut out = Vec::with_capacity(n.min(len));
    let mut it = v.into_iter();
    loop {
        let c: Vec<T> = it.by_ref().take(chunk).collect();
        if c.is_empty() {
            break;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::{joining, to_vec};

    #[test]
    fn split_vec_preserves_order_and_covers_everything() {
        let parts = split_vec((0..10).collect::<Vec<_>>(), 3);
        assert_eq!(parts, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);

        assert_eq!(split_vec(Vec::<u8>::new(), 4), vec![Vec::<u8>::new()]);
        assert_eq!(split_vec(vec![1], 4), vec![vec![1]]);
        assert_eq!(split_vec(vec![1, 2, 3], 8).len(), 3);
    }

    #[test]
    fn zero_counts_are_invalid_arguments() {
        for r in [
            Runner::partitioned(0),
            Runner::parallel(Some(0), None),
            Runner::parallel(None, Some(0)),
            Runner::sequential().with_partitions(0),
        ] {
            let err = r.run(vec![1, 2, 3], &to_vec()).unwrap_err();
            assert!(err.is_invalid_argument(), "{r:?} gave {err}");
        }
    }

    #[test]
    fn every_mode_keeps_list_order() -> Result<()> {
        let input: Vec<u32> = (0..257).collect();
        for r in [
            Runner::sequential(),
            Runner::partitioned(7),
            Runner::parallel(Some(3), Some(16)),
            Runner::default(),
        ] {
            assert_eq!(r.run(input.clone(), &to_vec())?, input);
        }
        Ok(())
    }

    #[test]
    fn injected_pool_is_used() -> Result<()> {
        let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().expect("pool"));
        let r = Runner::default().with_pool(pool).with_partitions(4);
        let out = r.run(vec!["a", "b", "c", "d", "e"], &joining::<&str>("-"))?;
        assert_eq!(out, "a-b-c-d-e");
        Ok(())
    }
}

//! Sequence adapter: one finite, owned input for every aggregation.
//!
//! A [`Sequence<T>`] normalises collections, iterators and line/record files
//! into a `Vec<T>` plus a "run in parallel" hint. All file I/O happens while
//! the sequence is built, never during accumulation.
//!
//! ### Overview
//! - [`from_vec`] / [`from_iter`] / [`Sequence::from_slice`] - in-memory sources.
//! - [`Sequence::from_optional`] - a possibly missing source; `None` is an
//!   [`Error::InvalidArgument`].
//! - [`Sequence::read_lines`] / [`Sequence::read_lines_utf8`] - text lines.
//! - [`Sequence::read_jsonl`] / [`Sequence::read_csv`] - typed records.
//!
//! ### Example
//! ```
//! use keyfold::*;
//!
//! let words = from_iter(["b", "a", "b", "c"]).parallel(true);
//! let counts = words.collect(grouping_by(|w: &&str| *w, counting()))?;
//! assert_eq!(counts["b"], 2);
//! # Ok::<_, keyfold::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::io::lines::{TextEncoding, read_lines_vec};
use crate::reducer::Reducer;
use crate::runner::Runner;
use std::path::Path;

/// A finite input sequence with a parallel-execution hint.
///
/// The hint is only a preference: [`collect`](Sequence::collect) maps it onto
/// [`Runner::for_hint`], and [`collect_with`](Sequence::collect_with) ignores it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence<T> {
    items: Vec<T>,
    parallel: bool,
}

/// Create a sequential [`Sequence<T>`] from a `Vec<T>`.
pub fn from_vec<T>(data: Vec<T>) -> Sequence<T> {
    Sequence {
        items: data,
        parallel: false,
    }
}

/// Create a sequential [`Sequence<T>`] from anything iterable.
pub fn from_iter<T, I>(iter: I) -> Sequence<T>
where
    I: IntoIterator<Item = T>,
{
    from_vec(iter.into_iter().collect())
}

impl<T> Sequence<T> {
    /// A sequence over a possibly missing source.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `source` is `None`.
    pub fn from_optional<I>(source: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        source
            .map(from_iter)
            .ok_or_else(|| Error::invalid("sequence source is missing"))
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        from_vec(data.to_vec())
    }

    /// Set the "run in parallel" hint.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Reduce with a runner chosen from the parallel hint.
    pub fn collect<R>(self, reducer: R) -> Result<R::Output>
    where
        T: Send,
        R: Reducer<T>,
    {
        let runner = Runner::for_hint(self.parallel);
        runner.run(self.items, &reducer)
    }

    /// Reduce with an explicit runner.
    pub fn collect_with<R>(self, runner: &Runner, reducer: &R) -> Result<R::Output>
    where
        T: Send,
        R: Reducer<T> + ?Sized,
    {
        runner.run(self.items, reducer)
    }
}

impl Sequence<String> {
    /// One element per line of `path`, decoded with `encoding`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for an empty path; [`Error::Io`] for open,
    /// read or decode failures.
    pub fn read_lines(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<Self> {
        read_lines_vec(path, encoding).map(from_vec)
    }

    /// [`read_lines`](Sequence::read_lines) with UTF-8.
    pub fn read_lines_utf8(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_lines(path, TextEncoding::Utf8)
    }
}

#[cfg(feature = "io-jsonl")]
impl<T: serde::de::DeserializeOwned> Sequence<T> {
    /// One element per JSON Lines record.
    pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        crate::io::jsonl::read_jsonl_vec(path).map(from_vec)
    }
}

#[cfg(feature = "io-csv")]
impl<T: serde::de::DeserializeOwned> Sequence<T> {
    /// One element per CSV record.
    pub fn read_csv(path: impl AsRef<Path>, has_headers: bool) -> Result<Self> {
        crate::io::csv::read_csv_vec(path, has_headers).map(from_vec)
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(data: Vec<T>) -> Self {
        from_vec(data)
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        from_iter(iter)
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::to_vec;

    #[test]
    fn missing_source_fails_fast() {
        let err = Sequence::<u8>::from_optional(None::<Vec<u8>>).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn empty_source_is_an_empty_sequence() -> Result<()> {
        let s = Sequence::from_optional(Some(Vec::<u8>::new()))?;
        assert!(s.is_empty());
        assert!(s.collect(to_vec())?.is_empty());
        Ok(())
    }

    #[test]
    fn parallel_hint_round_trips() -> Result<()> {
        let s: Sequence<u32> = (1..=100).collect();
        assert!(!s.is_parallel());
        let s = s.parallel(true);
        assert!(s.is_parallel());
        assert_eq!(s.collect(to_vec())?, (1..=100).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn missing_file_is_io_failure() {
        let err = Sequence::read_lines_utf8("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err}");
        let err = Sequence::read_lines_utf8("").unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

//! # keyfold
//!
//! An **in-memory aggregation engine** for Rust: group, count, join and build maps
//! over finite sequences with one composable abstraction that runs the same way
//! sequentially, over deterministic partitions, or in parallel on Rayon.
//!
//! ## Key Features
//!
//! - **Composable reducers** - accumulate / merge / finish units that nest freely
//! - **Null-tolerant grouping** - `Option<K>` keys give a first-class `None` bucket
//! - **Explicit collision policy** - `to_map` takes a merge function, `to_map_unique` fails loudly
//! - **Map merging** - union two maps with a key-aware 3-way merge function
//! - **String joining** - delimiter, prefix/suffix and custom stringifiers
//! - **Sequential, partitioned and parallel execution** - identical results in every mode
//! - **File-backed sources** - text lines (UTF-8 / Latin-1), JSON Lines and CSV, with gzip
//!   detected automatically
//! - **Typed errors** - one [`Error`] enum; caller closures may fail with `anyhow`
//!
//! ## Quick Start
//!
//! ```
//! use keyfold::*;
//!
//! # fn main() -> keyfold::Result<()> {
//! let lines = from_vec(vec![
//!     "hello world".to_string(),
//!     "hello rust".to_string(),
//! ]);
//!
//! let words: Vec<String> = lines
//!     .into_iter()
//!     .flat_map(|l| l.split_whitespace().map(String::from).collect::<Vec<_>>())
//!     .collect();
//!
//! let counts = from_vec(words)
//!     .parallel(true)
//!     .collect(grouping_by(|w: &String| w.clone(), counting()))?;
//!
//! assert_eq!(counts["hello"], 2);
//! assert_eq!(counts["rust"], 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Reducer
//!
//! A [`Reducer<T>`] describes one aggregation: `create` an empty accumulator,
//! `add_input` one element at a time, `merge` two accumulators built over adjacent
//! partitions, and `finish` into the visible output. Any split of the input into
//! partitions, merged left to right, finishes to the same value as one sequential
//! pass. The built-in descriptors live in [`reducers`]; implement the trait for
//! your own.
//!
//! ### Grouping
//!
//! [`grouping_by`] classifies every element and feeds it to a per-key
//! *downstream* reducer. Any reducer can be the downstream, including another
//! grouping, so multi-level grouping is just nesting:
//!
//! ```
//! use keyfold::*;
//!
//! # fn main() -> keyfold::Result<()> {
//! let rows = vec![(1, "x", 'A'), (1, "y", 'B'), (2, "x", 'A')];
//! let nested = grouping_by(
//!     |r: &(i32, &str, char)| r.0,
//!     grouping_by(|r: &(i32, &str, char)| r.1, to_vec()),
//! );
//! let out = Runner::sequential().run(rows, &nested)?;
//! assert_eq!(out[&1]["y"], vec![(1, "y", 'B')]);
//! assert_eq!(out[&2].len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ### Sequence
//!
//! A [`Sequence<T>`] is the input: built from a `Vec`, any iterator, a missing
//! source ([`Sequence::from_optional`]) or a file. It carries a *parallel hint*
//! that [`Sequence::collect`] turns into a [`Runner`].
//!
//! ### Execution Modes
//!
//! [`Runner`] drives a reducer in one of three [`ExecMode`]s:
//! - **Sequential** - one pass on the calling thread, in source order
//! - **Partitioned** - contiguous partitions on the calling thread, merged in order
//! - **Parallel** - partitions accumulated on a Rayon pool, then merged in order
//!
//! Because merging always follows partition order, list and join results keep
//! source order in every mode.
//!
//! ### Maps
//!
//! - [`to_map`] requires a merge function for colliding keys.
//! - [`to_map_unique`] has none and returns [`Error::DuplicateKey`] on a collision.
//! - [`merge::merge_maps`] unions two finished maps with a `(key, left, right)`
//!   function; returning `None` drops the key.
//!
//! ```
//! use keyfold::merge::merge_with;
//! use std::collections::HashMap;
//!
//! let left = HashMap::from([("a", 1), ("b", 2)]);
//! let right = HashMap::from([("b", 3), ("c", 4)]);
//! let sum = merge_with(left, right, |x, y| x + y);
//! assert_eq!(sum, HashMap::from([("a", 1), ("b", 5), ("c", 4)]));
//! ```
//!
//! ## I/O
//!
//! File-backed sequences read the whole file before any aggregation starts.
//! Gzip input is recognised by extension or magic bytes.
//!
//! ```no_run
//! use keyfold::*;
//!
//! # fn main() -> keyfold::Result<()> {
//! let lines = Sequence::read_lines("access.log.gz", TextEncoding::Utf8)?;
//! let by_status = lines.parallel(true).collect(grouping_by(
//!     |l: &String| l.split_whitespace().nth(8).map(str::to_owned),
//!     counting(),
//! ))?;
//! # let _ = by_status;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `io-jsonl` - JSON Lines sources ([`Sequence::read_jsonl`])
//! - `io-csv` - CSV sources ([`Sequence::read_csv`])
//! - `compression-gzip` - transparent gzip decompression
//!
//! All three are enabled by default.
//!
//! ## Module Overview
//!
//! - [`reducer`] - the `Reducer` trait and `Characteristics`
//! - [`reducers`] - built-in reducers (lists, sets, maps, grouping, joining, counting, ...)
//! - [`runner`] - execution modes and the accumulate / merge / finish driver
//! - [`merge`] - standalone map merging
//! - [`sequence`] - input adapter
//! - [`ops`] - one-call convenience functions taking a `parallel` flag
//! - [`io`] - line, JSON Lines and CSV readers with compression detection
//! - [`testing`] - assertion helpers for tests

pub mod error;
pub mod io;
pub mod merge;
pub mod ops;
pub mod reducer;
pub mod reducers;
pub mod runner;
pub mod sequence;
pub mod testing;

pub use error::{Error, Result};
pub use io::TextEncoding;
pub use reducer::{Characteristics, Reducer, reduce_seq};
pub use reducers::*;
pub use runner::{ExecMode, Runner};
pub use sequence::{Sequence, from_iter, from_vec};

//! Built-in reducer descriptors.
//!
//! Every type here implements [`Reducer`](crate::Reducer) and can be used on
//! its own (with [`Runner::run`](crate::Runner::run) or
//! [`Sequence::collect`](crate::Sequence::collect)) or as the downstream of a
//! grouping:
//!
//! - [`to_list`] / [`to_vec`] - `Vec<U>`, absent (`None`) values dropped, order kept.
//! - [`to_set`] / [`to_hash_set`] - `HashSet<U>`, absent values dropped.
//! - [`to_map`] - `HashMap<K, V>` with a mandatory merge function.
//! - [`to_map_unique`] - `HashMap<K, V>`, fails on the first duplicate key.
//! - [`grouping_by`] / [`try_grouping_by`] - `HashMap<K, D::Output>`, nestable.
//! - [`joining`] / [`joining_with`] / [`Joining::new`] - `String`.
//! - [`counting`], [`summing`], [`mapping`], [`filtering`] - downstream helpers.
//!
//! # Examples
//! ```
//! use keyfold::*;
//! use std::collections::HashMap;
//!
//! // (team, player, score)
//! let rows = vec![
//!     ("red", "ann", 3u32),
//!     ("red", "bob", 5),
//!     ("blue", "cid", 4),
//!     ("red", "ann", 1),
//! ];
//!
//! // team -> player -> total score
//! let totals = grouping_by(
//!     |r: &(&str, &str, u32)| r.0,
//!     grouping_by(|r: &(&str, &str, u32)| r.1, summing(|r: &(&str, &str, u32)| r.2)),
//! );
//! let out = Runner::partitioned(2).run(rows.clone(), &totals)?;
//! assert_eq!(out["red"]["ann"], 4);
//! assert_eq!(out["blue"]["cid"], 4);
//!
//! // player list per team, joined
//! let names = grouping_by(
//!     |r: &(&str, &str, u32)| r.0,
//!     mapping(|r: (&str, &str, u32)| r.1, joining_with::<&str>(",", "[", "]")),
//! );
//! let out = Runner::sequential().run(rows, &names)?;
//! let expected = HashMap::from([
//!     ("red", "[ann,bob,ann]".to_string()),
//!     ("blue", "[cid]".to_string()),
//! ]);
//! assert_eq!(out, expected);
//! # Ok::<_, keyfold::Error>(())
//! ```

mod basic;
mod collect;
mod grouping;
mod joining;
mod map;

pub use basic::{Counting, Filtering, Mapping, Summing, counting, filtering, mapping, summing};
pub use collect::{ToList, ToSet, to_hash_set, to_list, to_set, to_vec};
pub use grouping::{GroupingBy, grouping_by, try_grouping_by};
pub use joining::{Joining, joining, joining_with};
pub use map::{ToMap, ToMapUnique, to_map, to_map_unique};

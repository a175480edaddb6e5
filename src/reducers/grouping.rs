//! Classification / grouping engine.
//!
//! [`GroupingBy`] partitions elements by a classifier and folds each bucket
//! with a downstream [`Reducer`]. Because it is itself a `Reducer`, it can be
//! used as the downstream of another `GroupingBy` to build nested
//! (multi-key) groupings of any depth.
//!
//! Per element:
//! 1. compute the key (an `Option<_>` key's `None` is an ordinary bucket),
//! 2. find or lazily create the bucket with the downstream's `create`,
//! 3. apply the downstream's `add_input`.
//!
//! Partition merge walks the incoming map: buckets present on both sides are
//! merged by the downstream, buckets present on one side are carried through.
//! `finish` applies the downstream's `finish` per bucket.
//!
//! A classifier error aborts the whole call; no partial map is returned.
//!
//! ```
//! use keyfold::{counting, grouping_by, Runner};
//! use std::collections::HashMap;
//!
//! let words = vec!["apple", "avocado", "banana", "blueberry", "cherry"];
//! let by_initial = grouping_by(|w: &&str| w.chars().next(), counting());
//! let out = Runner::sequential().run(words, &by_initial)?;
//! assert_eq!(out, HashMap::from([(Some('a'), 2), (Some('b'), 2), (Some('c'), 1)]));
//! # Ok::<_, keyfold::Error>(())
//! ```

use crate::error::Result;
use crate::reducer::{Characteristics, Reducer};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Group by `classifier`, fold each group with `downstream`.
#[derive(Clone, Copy, Debug)]
pub struct GroupingBy<C, D> {
    classifier: C,
    downstream: D,
}

/// Grouping with an infallible classifier.
pub fn grouping_by<T, K, F, D>(
    classifier: F,
    downstream: D,
) -> GroupingBy<impl Fn(&T) -> anyhow::Result<K> + Send + Sync, D>
where
    F: Fn(&T) -> K + Send + Sync,
    D: Reducer<T>,
    K: Eq + Hash + Send,
{
    GroupingBy {
        classifier: move |t: &T| -> anyhow::Result<K> { Ok(classifier(t)) },
        downstream,
    }
}

/// Grouping with a fallible classifier. The first `Err` aborts the aggregation
/// and is returned unchanged inside [`Error::Caller`](crate::Error::Caller).
pub fn try_grouping_by<T, K, C, D>(classifier: C, downstream: D) -> GroupingBy<C, D>
where
    C: Fn(&T) -> anyhow::Result<K> + Send + Sync,
    D: Reducer<T>,
    K: Eq + Hash + Send,
{
    GroupingBy {
        classifier,
        downstream,
    }
}

impl<T, K, C, D> Reducer<T> for GroupingBy<C, D>
where
    C: Fn(&T) -> anyhow::Result<K> + Send + Sync,
    D: Reducer<T>,
    K: Eq + Hash + Send,
{
    type Acc = HashMap<K, D::Acc>;
    type Output = HashMap<K, D::Output>;

    fn create(&self) -> Self::Acc {
        HashMap::new()
    }

    fn add_input(&self, acc: &mut Self::Acc, item: T) -> Result<()> {
        let key = (self.classifier)(&item)?;
        let bucket = acc.entry(key).or_insert_with(|| self.downstream.create());
        self.downstream.add_input(bucket, item)
    }

    fn merge(&self, acc: &mut Self::Acc, other: Self::Acc) -> Result<()> {
        for (key, theirs) in other {
            match acc.entry(key) {
                Entry::Occupied(mut e) => self.downstream.merge(e.get_mut(), theirs)?,
                Entry::Vacant(e) => {
                    e.insert(theirs);
                }
            }
        }
        Ok(())
    }

    fn finish(&self, acc: Self::Acc) -> Result<Self::Output> {
        acc.into_iter()
            .map(|(k, a)| Ok((k, self.downstream.finish(a)?)))
            .collect()
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics {
            identity_finish: self.downstream.characteristics().identity_finish,
            unordered: true,
        }
    }
}

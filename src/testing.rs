//! Assertion helpers for aggregation results.
//!
//! Grouped results come back as `HashMap`s whose iteration order varies from
//! run to run, and set-like reducers make no order promise at all. These
//! helpers panic with a message that shows both sides and the first point of
//! difference.
//!
//! - [`assert_collections_equal`]: exact, order-dependent comparison.
//! - [`assert_collections_unordered_equal`]: same elements with the same multiplicity.
//! - [`assert_maps_equal`]: key-by-key comparison, reporting missing and extra keys.
//! - [`assert_grouped_unordered_equal`]: grouped `Vec` values compared ignoring order.
//!
//! ```
//! use keyfold::ops;
//! use keyfold::testing::*;
//!
//! let out = ops::to_list(vec![Some(1), None, Some(2)], |x| x, true)?;
//! assert_collections_equal(&out, &[1, 2]);
//! # Ok::<_, keyfold::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Assert that two slices are equal element by element.
///
/// # Panics
/// On a length or element mismatch.
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two slices hold the same elements, ignoring order.
///
/// Duplicates count: `[1, 1, 2]` and `[1, 2, 2]` are different.
///
/// # Panics
/// If any element occurs a different number of times on each side.
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    let actual_counts = occurrences(actual);
    let expected_counts = occurrences(expected);
    if actual_counts == expected_counts {
        return;
    }

    let missing: Vec<_> = expected_counts
        .iter()
        .filter(|(k, n)| actual_counts.get(*k).copied().unwrap_or(0) < **n)
        .map(|(k, _)| *k)
        .collect();
    let extra: Vec<_> = actual_counts
        .iter()
        .filter(|(k, n)| expected_counts.get(*k).copied().unwrap_or(0) < **n)
        .map(|(k, _)| *k)
        .collect();
    panic!(
        "Collection content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

fn occurrences<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Assert that two maps hold the same keys with equal values.
///
/// # Panics
/// On the first missing key, unexpected key or differing value.
///
/// ```
/// use keyfold::testing::assert_maps_equal;
/// use std::collections::HashMap;
///
/// let actual = HashMap::from([("a", 1), ("b", 2)]);
/// assert_maps_equal(&actual, &HashMap::from([("b", 2), ("a", 1)]));
/// ```
pub fn assert_maps_equal<K, V, S: BuildHasher>(
    actual: &HashMap<K, V, S>,
    expected: &HashMap<K, V, S>,
)
where
    K: Debug + Eq + Hash,
    V: Debug + PartialEq,
{
    for (key, expected_value) in expected {
        match actual.get(key) {
            Some(actual_value) if actual_value == expected_value => {}
            Some(actual_value) => panic!(
                "HashMap value mismatch for key {key:?}:\n  Expected: {expected_value:?}\n  Actual: {actual_value:?}"
            ),
            None => panic!("HashMap missing key: {key:?}\n  Actual: {actual:?}"),
        }
    }
    let extra: Vec<_> = actual.keys().filter(|k| !expected.contains_key(*k)).collect();
    assert!(extra.is_empty(), "HashMap has unexpected keys: {extra:?}\n  Expected: {expected:?}");
}

/// Assert that two grouped results match, comparing every bucket ignoring order.
///
/// # Panics
/// If the key sets differ or any bucket holds different elements.
pub fn assert_grouped_unordered_equal<K, V, S: BuildHasher>(
    actual: &HashMap<K, Vec<V>, S>,
    expected: &HashMap<K, Vec<V>, S>,
) where
    K: Debug + Eq + Hash,
    V: Debug + Eq + Hash,
{
    let mut missing: Vec<_> = expected.keys().filter(|k| !actual.contains_key(*k)).collect();
    missing.extend(actual.keys().filter(|k| !expected.contains_key(*k)));
    assert!(missing.is_empty(), "Grouped key sets differ on {missing:?}");

    for (key, expected_values) in expected {
        let actual_values = &actual[key];
        assert!(
            occurrences(actual_values) == occurrences(expected_values),
            "Bucket mismatch for key {key:?}:\n  Expected values: {expected_values:?}\n  Actual values: {actual_values:?}"
        );
    }
}

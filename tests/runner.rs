use anyhow::Result;
use keyfold::*;
use rayon::ThreadPoolBuilder;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mean of `f64`s, finished from a `(sum, count)` container.
struct Mean;

impl Reducer<f64> for Mean {
    type Acc = (f64, u64);
    type Output = Option<f64>;

    fn create(&self) -> Self::Acc {
        (0.0, 0)
    }

    fn add_input(&self, acc: &mut Self::Acc, x: f64) -> keyfold::Result<()> {
        acc.0 += x;
        acc.1 += 1;
        Ok(())
    }

    fn merge(&self, acc: &mut Self::Acc, other: Self::Acc) -> keyfold::Result<()> {
        acc.0 += other.0;
        acc.1 += other.1;
        Ok(())
    }

    fn finish(&self, acc: Self::Acc) -> keyfold::Result<Option<f64>> {
        Ok((acc.1 > 0).then(|| acc.0 / acc.1 as f64))
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::UNORDERED
    }
}

#[test]
fn custom_reducer_works_as_downstream() -> Result<()> {
    let temps = vec![("oslo", 2.0), ("rome", 18.0), ("oslo", 4.0), ("rome", 20.0), ("lima", 15.0)];
    let reducer = grouping_by(|t: &(&str, f64)| t.0, mapping(|t: (&str, f64)| t.1, Mean));
    let out = Runner::parallel(None, Some(3)).run(temps, &reducer)?;
    assert_eq!(out["oslo"], Some(3.0));
    assert_eq!(out["rome"], Some(19.0));
    assert_eq!(out["lima"], Some(15.0));

    assert_eq!(Runner::default().run(Vec::new(), &Mean)?, None);
    Ok(())
}

#[test]
fn reduce_seq_is_the_reference() -> Result<()> {
    let words = ["x", "yy", "x", "zzz", "yy", "x"];
    let reducer = grouping_by(|w: &&str| w.len(), counting());
    let reference = reduce_seq(&reducer, words)?;
    assert_eq!(reference, HashMap::from([(1, 3), (2, 2), (3, 1)]));
    for parts in 1..=8 {
        assert_eq!(Runner::partitioned(parts).run(words.to_vec(), &reducer)?, reference);
    }
    Ok(())
}

#[test]
fn grouping_advertises_downstream_finish() {
    let g = grouping_by(|n: &u8| *n, counting());
    let c = Reducer::<u8>::characteristics(&g);
    assert!(c.identity_finish);
    assert!(c.unordered);

    let g = grouping_by(|n: &u8| *n, joining::<u8>(","));
    assert!(!Reducer::<u8>::characteristics(&g).identity_finish);
}

#[test]
fn injected_pool_runs_every_partition() -> Result<()> {
    let pool = Arc::new(ThreadPoolBuilder::new().num_threads(3).build()?);
    let calls = AtomicUsize::new(0);
    let reducer = try_grouping_by(
        |n: &u32| {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(n % 4)
        },
        counting(),
    );

    let runner = Runner::default().with_pool(pool).with_partitions(6);
    let out = runner.run((0..600u32).collect(), &reducer)?;
    assert_eq!(calls.load(Ordering::Relaxed), 600);
    assert_eq!(out.values().sum::<u64>(), 600);
    assert!(out.values().all(|n| *n == 150));
    Ok(())
}

#[test]
fn for_hint_maps_the_parallel_flag() {
    assert_eq!(Runner::for_hint(false).mode, ExecMode::Sequential);
    assert!(matches!(Runner::for_hint(true).mode, ExecMode::Parallel { .. }));
    assert!(Runner::default().default_partitions >= 4);
}

#[test]
fn zero_partitions_are_rejected_before_work() {
    let calls = AtomicUsize::new(0);
    let reducer = to_list(|n: u32| {
        calls.fetch_add(1, Ordering::Relaxed);
        Some(n)
    });
    let err = Runner::parallel(None, Some(0)).run(vec![1, 2, 3], &reducer).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    let runner = Runner::sequential().with_mode(ExecMode::Partitioned { partitions: 0 });
    let err = runner.validate().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn caller_panics_propagate() {
    let reducer = grouping_by(|n: &u32| if *n == 9 { panic!("boom") } else { *n }, counting());
    let runner = Runner::parallel(Some(2), Some(4));
    let result =
        std::panic::catch_unwind(AssertUnwindSafe(|| runner.run((0..20u32).collect(), &reducer)));
    assert!(result.is_err());
}

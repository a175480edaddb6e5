use keyfold::*;
use proptest::prelude::*;
use std::collections::HashMap;

type Row = (Option<u8>, i32);

fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((prop::option::of(0u8..6), -50i32..50), 0..200)
}

fn arb_runner() -> impl Strategy<Value = Runner> {
    prop_oneof![
        (1usize..40).prop_map(Runner::partitioned),
        (1usize..40).prop_map(|p| Runner::parallel(None, Some(p))),
        (1usize..4, 1usize..16).prop_map(|(t, p)| Runner::parallel(Some(t), Some(p))),
    ]
}

fn grouped(rows: &[Row], runner: &Runner) -> keyfold::Result<HashMap<Option<u8>, Vec<i32>>> {
    runner.run(rows.to_vec(), &grouping_by(|r: &Row| r.0, mapping(|r: Row| r.1, to_vec())))
}

proptest! {
    #[test]
    fn partitioned_grouping_matches_sequential(rows in arb_rows(), runner in arb_runner()) {
        let sequential = grouped(&rows, &Runner::sequential()).unwrap();
        let split = grouped(&rows, &runner).unwrap();
        prop_assert_eq!(split, sequential);
    }

    #[test]
    fn nested_summing_matches_sequential(rows in arb_rows(), runner in arb_runner()) {
        let reducer = grouping_by(
            |r: &Row| r.0,
            grouping_by(|r: &Row| r.1.signum(), summing(|r: &Row| i64::from(r.1))),
        );
        let sequential = reduce_seq(&reducer, rows.clone()).unwrap();
        prop_assert_eq!(runner.run(rows, &reducer).unwrap(), sequential);
    }

    #[test]
    fn keep_left_to_map_is_idempotent(rows in arb_rows(), parallel in any::<bool>()) {
        let keep_left = |a: i32, _b: i32| a;
        let once = ops::to_map(rows, |r| r.0, |r| r.1, keep_left, parallel).unwrap();
        let doubled: Vec<Row> = once.clone().into_iter().chain(once.clone()).collect();
        let twice = ops::to_map(doubled, |r| r.0, |r| r.1, keep_left, parallel).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn joining_matches_std_join(
        words in prop::collection::vec("[a-z]{0,4}", 0..60),
        runner in arb_runner(),
    ) {
        let out = runner.run(words.clone(), &joining_with::<String>(",", "[", "]")).unwrap();
        prop_assert_eq!(out, format!("[{}]", words.join(",")));
    }
}

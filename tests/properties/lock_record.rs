//! Property tests for lock line parsing/rendering.

use proptest::prelude::*;

use pap::domain::entities::LockRecord;

fn field() -> impl Strategy<Value = String> {
    // Starts and ends with a non-space; may contain the CSV specials.
    proptest::string::string_regex("[A-Za-z0-9_]([A-Za-z0-9._/,\" -]{0,14}[A-Za-z0-9_])?").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn parse_never_panics(line in ".*") {
        let _ = LockRecord::parse(&line);
    }

    #[test]
    fn to_line_round_trips(stage in field(), branch in field(), timestamp in any::<i64>()) {
        let record = LockRecord::new(stage, branch, timestamp);
        let line = record.to_line();
        prop_assert!(!line.contains('\n'));
        prop_assert_eq!(LockRecord::parse(&line), Ok(record.clone()));
        prop_assert_eq!(LockRecord::parse(&format!("{}\n", line)), Ok(record));
    }

    #[test]
    fn age_never_overflows(timestamp in any::<i64>(), now in any::<i64>()) {
        let record = LockRecord::new("live", "main", timestamp);
        let _ = record.age_at(now);
    }
}

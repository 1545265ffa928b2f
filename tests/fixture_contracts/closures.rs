//! closure_capture contracts

use crate::common::*;
use faultline::closures::{create_multipliers, create_validators, sample_rules, MULTIPLIER_COUNT};
use proptest::prelude::*;

#[test]
fn multipliers_all_use_last_index() {
    let results: Vec<i64> = create_multipliers().iter().map(|m| m(10)).collect();
    assert_eq!(results, vec![40; MULTIPLIER_COUNT as usize]);
}

#[test]
fn validators_all_use_last_rule() {
    let validators = create_validators(&sample_rules());
    let age = &validators["age"];
    // 100 is a valid age but above the temperature ceiling
    assert_eq!(
        age(100.0).as_deref(),
        Some("temperature must be between -40 and 60")
    );
    // -10 is not a valid age but passes the temperature bounds
    assert!(age(-10.0).is_none());
    assert_eq!(validators.len(), 3);
}

#[test]
fn fixture_reports_late_binding() {
    let report = run_fixture("closure_capture");
    assert_eq!(observed(&report, "multipliers applied to 10"), "[40, 40, 40, 40, 40]");
}

proptest! {
    #[test]
    fn every_multiplier_is_the_same_function(x in -1_000i64..1_000) {
        let multipliers = create_multipliers();
        let first = multipliers[0](x);
        prop_assert_eq!(first, x * (MULTIPLIER_COUNT - 1));
        prop_assert!(multipliers.iter().all(|m| m(x) == first));
    }
}

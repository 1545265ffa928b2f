//! average_age contracts

use crate::common::*;
use faultline::average_age::{
    calculate_average_age, calculate_average_age_typed, load_typed_users, load_users,
    EXPECTED_AVERAGE_AGE,
};

#[test]
fn seeded_average_is_not_correct() {
    match calculate_average_age(&load_users()) {
        Ok(avg) => assert_ne!(avg, EXPECTED_AVERAGE_AGE),
        Err(e) => assert!(e.is_defect_failure()),
    }
}

#[test]
fn typed_control_matches_expected() {
    assert_eq!(calculate_average_age_typed(&load_typed_users()), EXPECTED_AVERAGE_AGE);
}

#[test]
fn fixture_reports_divergence() {
    let report = run_fixture("average_age");
    assert!(report.defect_reproduced());
    assert_ne!(observed(&report, "average age"), "30.5");
    assert!(report
        .output
        .iter()
        .any(|l| l == "Average age of active users (typed): 30.5"));
}

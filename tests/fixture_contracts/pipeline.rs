//! tagged_record_pipeline contracts

use crate::common::*;
use faultline::pipeline::{calculate_totals, filter_active, load_records, EXPECTED_GRAND_TOTAL};

#[test]
fn text_quantity_is_admitted_by_filter() {
    let active = filter_active(&load_records()).unwrap();
    let ids: Vec<i64> = active
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_int))
        .collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 6]);
    assert!(active
        .iter()
        .any(|r| r.get("quantity").is_some_and(Value::is_string)));
}

#[test]
fn totals_stop_on_text_quantity() {
    let active = filter_active(&load_records()).unwrap();
    assert!(matches!(
        calculate_totals(&active),
        Err(faultline::Error::TypeMismatch { op: "*", .. })
    ));
}

#[test]
fn fixture_never_reports_expected_total() {
    let report = run_fixture("tagged_record_pipeline");
    assert!(report.failure.is_some());
    assert_ne!(observed(&report, "grand total"), format!("${:.2}", EXPECTED_GRAND_TOTAL));
    assert_eq!(report.output[0], "Admitted records: [1, 2, 4, 5, 6]");
}

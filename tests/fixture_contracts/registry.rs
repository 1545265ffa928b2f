//! Registry and report format contracts

use crate::common::*;
use faultline::DefectKind;

#[test]
fn registry_order_and_defects() {
    let entries: Vec<(&str, DefectKind)> = all_fixtures()
        .iter()
        .map(|f| (f.name(), f.defect()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("tagged_record_pipeline", DefectKind::TypeCoercion),
            ("average_age", DefectKind::TypeCoercion),
            ("layered_processors", DefectKind::MisdirectedDelegation),
            ("closure_capture", DefectKind::LateBindingCapture),
            ("stale_read_transfer", DefectKind::StaleRead),
            ("tree_depth", DefectKind::OffByOneRecursion),
        ]
    );
}

#[test]
fn every_fixture_reproduces_and_is_deterministic() {
    init_test_tracing();
    for fixture in all_fixtures() {
        let first = fixture.run();
        let second = fixture.run();
        assert!(first.defect_reproduced(), "{} stayed silent", fixture.name());
        assert_eq!(first.output, second.output, "{} output drifted", fixture.name());
        assert_eq!(first.observations, second.observations);
    }
}

#[test]
fn reports_serialize_with_stable_keys() {
    let report = run_fixture("tree_depth");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["fixture"], "tree_depth");
    assert_eq!(json["defect"], "off_by_one_recursion");
    assert!(json["output"].is_array());
    assert!(json["observations"].is_array());
    assert!(json.get("failure").is_none());

    let failing = serde_json::to_value(run_fixture("average_age")).unwrap();
    assert!(failing["failure"].is_string());
}

#[test]
fn unknown_fixture_is_rejected() {
    assert!(matches!(
        find_fixture("missing"),
        Err(faultline::Error::UnknownFixture(_))
    ));
}

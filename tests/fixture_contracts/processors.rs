//! layered_processors contracts

use crate::common::*;
use faultline::processors::{
    enrich_event, sample_events, OutcomeKind, Process, TransformingProcessor, SAMPLE_ALLOWED_TYPES,
};

fn sample_chain() -> TransformingProcessor {
    TransformingProcessor::new(SAMPLE_ALLOWED_TYPES, Box::new(enrich_event))
}

#[test]
fn stored_events_miss_enrichment() {
    let mut chain = sample_chain();
    for event in sample_events() {
        chain.process(&event).unwrap();
    }
    let first = &chain.events()[0];
    assert_eq!(first.get("data"), Some(&Value::from("button_submit")));
    assert!(!first.contains_key("timestamp"));
}

#[test]
fn counters_per_stage() {
    let mut chain = sample_chain();
    let outcomes: Vec<_> = sample_events()
        .iter()
        .map(|e| chain.process(e).unwrap())
        .collect();
    assert_eq!(chain.processed_count(), 4);
    assert_eq!(chain.filtered_count(), 1);
    assert!(matches!(
        &outcomes[2].kind,
        OutcomeKind::Filtered { event_type } if *event_type == Value::from("hover")
    ));
    assert!(outcomes[0].transformed);
}

#[test]
fn fixture_reports_lowercase_click_data() {
    let report = run_fixture("layered_processors");
    assert_eq!(observed(&report, "stored click data"), "\"button_submit\"");
}

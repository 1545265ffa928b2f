//! Shared helpers for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::Once;

pub use faultline::{all_fixtures, find_fixture, Fixture, FixtureReport, Record, Value};

static INIT_TRACING: Once = Once::new();

/// Route fixture diagnostics through the test writer.
pub fn init_test_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Run a registered fixture by name.
pub fn run_fixture(name: &str) -> FixtureReport {
    init_test_tracing();
    find_fixture(name)
        .unwrap_or_else(|e| panic!("fixture {} not registered: {}", name, e))
        .run()
}

/// Find an observation's actual value by label.
pub fn observed<'a>(report: &'a FixtureReport, label: &str) -> &'a str {
    report
        .observations
        .iter()
        .find(|o| o.label == label)
        .map(|o| o.actual.as_str())
        .unwrap_or_else(|| panic!("no observation '{}' in {}", label, report.fixture))
}

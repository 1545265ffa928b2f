//! Fixture format and registry
//!
//! Every fixture is a leaf: it builds its own sample data, runs one buggy
//! routine, and reports what it printed together with expected-vs-actual
//! observations. A fixture succeeds when its defect is *reproduced*.

use faultline_core::{Error, Result};
use serde::Serialize;
use std::fmt;

/// The class of logic defect a fixture is seeded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// Mixed-type arithmetic or comparison on a dynamically typed field
    TypeCoercion,
    /// A stage delegates with the wrong argument
    MisdirectedDelegation,
    /// Closures share a mutable loop variable instead of snapshotting it
    LateBindingCapture,
    /// Check-then-act on a value that changed in between
    StaleRead,
    /// Recursion that advances its depth counter on one branch only
    OffByOneRecursion,
}

impl DefectKind {
    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectKind::TypeCoercion => "type_coercion",
            DefectKind::MisdirectedDelegation => "misdirected_delegation",
            DefectKind::LateBindingCapture => "late_binding_capture",
            DefectKind::StaleRead => "stale_read",
            DefectKind::OffByOneRecursion => "off_by_one_recursion",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One expected-vs-actual comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// What was measured
    pub label: String,
    /// Value a correct program would produce
    pub expected: String,
    /// Value the seeded program produced
    pub actual: String,
}

impl Observation {
    /// Create an observation from anything displayable
    pub fn new(
        label: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self {
            label: label.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Whether the defect shows in this observation
    pub fn reproduced(&self) -> bool {
        self.expected != self.actual
    }
}

/// Result of running one fixture
#[derive(Debug, Clone, Serialize)]
pub struct FixtureReport {
    /// Fixture name
    pub fixture: &'static str,
    /// Seeded defect class
    pub defect: DefectKind,
    /// Lines the fixture printed
    pub output: Vec<String>,
    /// Expected-vs-actual comparisons
    pub observations: Vec<Observation>,
    /// Failure the defect surfaced, if the run stopped on one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FixtureReport {
    /// Start an empty report
    pub fn new(fixture: &'static str, defect: DefectKind) -> Self {
        Self {
            fixture,
            defect,
            output: Vec::new(),
            observations: Vec::new(),
            failure: None,
        }
    }

    /// Record a printed line
    pub fn line(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Record an observation
    pub fn observe(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Record a surfaced failure; a failure counts as reproduction.
    pub fn fail(&mut self, err: &Error) {
        self.line(format!("error: {}", err));
        self.failure = Some(err.to_string());
    }

    /// Whether any observation diverged or a failure was surfaced
    pub fn defect_reproduced(&self) -> bool {
        self.failure.is_some() || self.observations.iter().any(Observation::reproduced)
    }
}

/// A seeded-defect fixture
pub trait Fixture {
    /// Registry name
    fn name(&self) -> &'static str;

    /// Seeded defect class
    fn defect(&self) -> DefectKind;

    /// One-line description
    fn summary(&self) -> &'static str;

    /// Run the fixture on its hardcoded sample data
    fn run(&self) -> FixtureReport;
}

/// All fixtures in registry order
pub fn all_fixtures() -> Vec<Box<dyn Fixture>> {
    vec![
        Box::new(crate::pipeline::PipelineFixture),
        Box::new(crate::average_age::AverageAgeFixture),
        Box::new(crate::processors::ProcessorFixture),
        Box::new(crate::closures::ClosureFixture),
        Box::new(crate::transfer::TransferFixture),
        Box::new(crate::tree::TreeFixture),
    ]
}

/// Look a fixture up by name
pub fn find_fixture(name: &str) -> Result<Box<dyn Fixture>> {
    all_fixtures()
        .into_iter()
        .find(|f| f.name() == name)
        .ok_or_else(|| Error::UnknownFixture(name.to_string()))
}

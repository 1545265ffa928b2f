//! Late-binding closure capture
//!
//! Every closure built in a loop holds a clone of one `Rc` cell that the
//! loop overwrites on each iteration, instead of a copy of the iteration's
//! value. Calls made after the loop all see the last value written.

use crate::fixture::{DefectKind, Fixture, FixtureReport, Observation};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;

/// Number of multipliers built by [`create_multipliers`]
pub const MULTIPLIER_COUNT: i64 = 5;

/// `x -> x * index`
pub type Multiplier = Box<dyn Fn(i64) -> i64>;

/// Returns an error message when the value is out of range
pub type Validator = Box<dyn Fn(f64) -> Option<String>>;

/// Build [`MULTIPLIER_COUNT`] multipliers, one per loop index.
pub fn create_multipliers() -> Vec<Multiplier> {
    let index = Rc::new(Cell::new(0i64));
    let mut multipliers: Vec<Multiplier> = Vec::new();
    for i in 0..MULTIPLIER_COUNT {
        index.set(i);
        let index = Rc::clone(&index);
        multipliers.push(Box::new(move |x: i64| x * index.get()));
    }
    debug!(count = multipliers.len(), "multipliers created");
    multipliers
}

/// A range rule for one field
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Field the rule validates
    pub field: String,
    /// Inclusive lower bound, 0 when absent
    pub min: Option<f64>,
    /// Inclusive upper bound, +inf when absent
    pub max: Option<f64>,
}

impl Rule {
    /// Rule with both bounds
    pub fn new(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            field: field.into(),
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Build one validator per rule, keyed by field name.
pub fn create_validators(rules: &[Rule]) -> BTreeMap<String, Validator> {
    let field = Rc::new(RefCell::new(String::new()));
    let min_val = Rc::new(Cell::new(0.0f64));
    let max_val = Rc::new(Cell::new(f64::INFINITY));

    let mut validators: BTreeMap<String, Validator> = BTreeMap::new();
    for rule in rules {
        *field.borrow_mut() = rule.field.clone();
        min_val.set(rule.min.unwrap_or(0.0));
        max_val.set(rule.max.unwrap_or(f64::INFINITY));

        let (field, min_val, max_val) = (
            Rc::clone(&field),
            Rc::clone(&min_val),
            Rc::clone(&max_val),
        );
        validators.insert(
            rule.field.clone(),
            Box::new(move |value: f64| {
                if value < min_val.get() || value > max_val.get() {
                    return Some(format!(
                        "{} must be between {} and {}",
                        field.borrow(),
                        min_val.get(),
                        max_val.get()
                    ));
                }
                None
            }),
        );
    }
    validators
}

/// The three sample rules
pub fn sample_rules() -> Vec<Rule> {
    vec![
        Rule::new("age", 0.0, 150.0),
        Rule::new("score", 0.0, 100.0),
        Rule::new("temperature", -40.0, 60.0),
    ]
}

fn render(result: Option<String>) -> String {
    result.unwrap_or_else(|| "valid".to_string())
}

/// Registry entry for the closure fixture
pub struct ClosureFixture;

impl Fixture for ClosureFixture {
    fn name(&self) -> &'static str {
        "closure_capture"
    }

    fn defect(&self) -> DefectKind {
        DefectKind::LateBindingCapture
    }

    fn summary(&self) -> &'static str {
        "closures observe a shared loop cell instead of their iteration's value"
    }

    fn run(&self) -> FixtureReport {
        let mut report = FixtureReport::new(self.name(), self.defect());

        let results: Vec<i64> = create_multipliers().iter().map(|m| m(10)).collect();
        report.line(format!("Multiplier results: {:?}", results));
        let expected: Vec<i64> = (0..MULTIPLIER_COUNT).map(|i| i * 10).collect();
        report.observe(Observation::new(
            "multipliers applied to 10",
            format!("{:?}", expected),
            format!("{:?}", results),
        ));

        let validators = create_validators(&sample_rules());
        let probes = [
            ("age", 200.0, Some("age must be between 0 and 150")),
            ("score", 50.0, None),
            ("temperature", 100.0, Some("temperature must be between -40 and 60")),
        ];
        for (field, value, expected) in probes {
            let actual = validators.get(field).and_then(|v| v(value));
            report.line(format!("Validate {}={}: {}", field, value, render(actual.clone())));
            report.observe(Observation::new(
                format!("validate {}={}", field, value),
                render(expected.map(str::to_string)),
                render(actual),
            ));
        }
        report
    }
}

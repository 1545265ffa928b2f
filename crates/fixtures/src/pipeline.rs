//! Tagged-record pipeline
//!
//! Load -> filter -> aggregate -> report over seven sales records. Record 2
//! carries its quantity as text (`"5"`). The filter compares it against
//! `Int(0)` lexicographically and admits it; the aggregation then multiplies
//! `Float * String`, which has no rule and fails with a type mismatch.

use crate::fixture::{DefectKind, Fixture, FixtureReport, Observation};
use faultline_core::{Record, Result, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Grand total a numerically typed data set would report
pub const EXPECTED_GRAND_TOTAL: f64 = 1900.47;

/// Per-category accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Sum of `price * quantity`
    pub total_value: Value,
    /// Number of records folded in
    pub item_count: u64,
}

impl Default for CategoryTotal {
    fn default() -> Self {
        Self {
            total_value: Value::Int(0),
            item_count: 0,
        }
    }
}

/// Category name -> totals, iterated in name order
pub type Totals = BTreeMap<String, CategoryTotal>;

/// Simulate loading records from a JSON source.
pub fn load_records() -> Vec<Record> {
    let raw = serde_json::json!([
        {"id": 1, "category": "electronics", "price": 299.99, "quantity": 2, "status": "active"},
        {"id": 2, "category": "books", "price": 15.50, "quantity": "5", "status": "active"},
        {"id": 3, "category": "electronics", "price": 149.99, "quantity": 1, "status": "inactive"},
        {"id": 4, "category": "clothing", "price": 45.00, "quantity": 3, "status": "active"},
        {"id": 5, "category": "electronics", "price": 999.99, "quantity": 1, "status": "active"},
        {"id": 6, "category": "books", "price": 22.00, "quantity": 4, "status": "active"},
        {"id": 7, "category": "clothing", "price": 89.99, "quantity": 0, "status": "active"},
    ]);

    match Value::from(raw) {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Keep active records with a quantity greater than zero.
///
/// The quantity is compared as whatever type it holds.
pub fn filter_active(records: &[Record]) -> Result<Vec<Record>> {
    let active = Value::from("active");
    let zero = Value::Int(0);
    let mut result = Vec::new();
    for r in records {
        if *r.require("status")? == active && r.require("quantity")?.gt(&zero)? {
            let id = r.get("id").unwrap_or(&Value::Null);
            debug!(%id, "record admitted");
            result.push(r.clone());
        }
    }
    Ok(result)
}

/// Accumulate `price * quantity` per category.
pub fn calculate_totals(records: &[Record]) -> Result<Totals> {
    let mut totals = Totals::new();
    for r in records {
        let category = match r.require("category")? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let id = r.get("id").unwrap_or(&Value::Null);
        let value = r.require("price")?.mul(r.require("quantity")?).map_err(|e| {
            warn!(%id, error = %e, "line value failed");
            e
        })?;
        let entry = totals.entry(category).or_default();
        entry.total_value = entry.total_value.add(&value)?;
        entry.item_count += 1;
    }
    Ok(totals)
}

/// Grand total across categories
pub fn grand_total(totals: &Totals) -> f64 {
    totals
        .values()
        .filter_map(|t| t.total_value.as_number())
        .fold(0.0, |acc, v| acc + v)
}

/// Format totals into a report, categories sorted by name.
pub fn format_report(totals: &Totals) -> String {
    let mut lines = vec!["=== Sales Report ===".to_string()];
    for (category, data) in totals {
        lines.push(format!(
            "  {}: ${:.2} ({} items)",
            category,
            data.total_value.as_number().unwrap_or_default(),
            data.item_count
        ));
    }
    lines.push(format!("  Grand Total: ${:.2}", grand_total(totals)));
    lines.join("\n")
}

/// Registry entry for the pipeline fixture
pub struct PipelineFixture;

impl Fixture for PipelineFixture {
    fn name(&self) -> &'static str {
        "tagged_record_pipeline"
    }

    fn defect(&self) -> DefectKind {
        DefectKind::TypeCoercion
    }

    fn summary(&self) -> &'static str {
        "text quantity slips through a lexicographic filter and breaks aggregation"
    }

    fn run(&self) -> FixtureReport {
        let mut report = FixtureReport::new(self.name(), self.defect());
        let records = load_records();

        let active = match filter_active(&records) {
            Ok(active) => active,
            Err(e) => {
                report.fail(&e);
                return report;
            }
        };
        let ids: Vec<String> = active
            .iter()
            .map(|r| r.get("id").unwrap_or(&Value::Null).to_string())
            .collect();
        report.line(format!("Admitted records: [{}]", ids.join(", ")));

        let actual = match calculate_totals(&active) {
            Ok(totals) => {
                let text = format_report(&totals);
                text.lines().for_each(|l| report.line(l));
                format!("${:.2}", grand_total(&totals))
            }
            Err(e) => {
                report.fail(&e);
                format!("error: {}", e)
            }
        };
        report.observe(Observation::new(
            "grand total",
            format!("${:.2}", EXPECTED_GRAND_TOTAL),
            actual,
        ));
        report
    }
}

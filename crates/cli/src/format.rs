//! Report -> human/json string formatting.
//!
//! - **Human** (default): one block per fixture, printed lines then observations
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use faultline_core::{Error, OutputMode};
use faultline_fixtures::{Fixture, FixtureReport};

/// Format a batch of fixture reports.
pub fn format_reports(reports: &[FixtureReport], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(reports)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => {
            let mut blocks: Vec<String> = reports.iter().map(format_report_human).collect();
            let reproduced = reports.iter().filter(|r| r.defect_reproduced()).count();
            blocks.push(format!(
                "{}/{} fixtures reproduced their defect",
                reproduced,
                reports.len()
            ));
            blocks.join("\n\n")
        }
    }
}

fn format_report_human(report: &FixtureReport) -> String {
    let mut lines = vec![format!("== {} [{}] ==", report.fixture, report.defect)];
    lines.extend(report.output.iter().map(|l| format!("  {}", l)));
    if !report.observations.is_empty() {
        lines.push("  expected vs actual:".to_string());
        for o in &report.observations {
            let marker = if o.reproduced() { "reproduced" } else { "matches" };
            lines.push(format!(
                "    {}: expected {}, actual {} ({})",
                o.label, o.expected, o.actual, marker
            ));
        }
    }
    let verdict = if report.defect_reproduced() { "yes" } else { "no" };
    lines.push(format!("  defect reproduced: {}", verdict));
    lines.join("\n")
}

/// Format the fixture registry.
pub fn format_listing(fixtures: &[Box<dyn Fixture>], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let entries: Vec<serde_json::Value> = fixtures
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "name": f.name(),
                        "defect": f.defect(),
                        "summary": f.summary(),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&entries)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
        OutputMode::Human => fixtures
            .iter()
            .map(|f| format!("{:<24} {:<24} {}", f.name(), f.defect(), f.summary()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": err.to_string()
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}

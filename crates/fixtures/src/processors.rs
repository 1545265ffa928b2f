//! Layered event processors
//!
//! Three stages composed explicitly, each behind [`Process`]:
//!
//! ```text
//! TransformingProcessor -> FilteringProcessor -> EventProcessor
//!   (transform, log)        (allow-set)           (validate, store)
//! ```
//!
//! The transforming stage computes an enriched event and then hands the
//! original one down the chain, so stored events never carry the
//! enrichment. Each stage keeps its own counters.

use crate::fixture::{DefectKind, Fixture, FixtureReport, Observation};
use faultline_core::{Error, Record, Result, Value};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

/// Timestamp stamped on every enriched event
pub const ENRICH_TIMESTAMP: &str = "2024-01-15T10:30:00Z";

/// What a stage did with an event
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeKind {
    /// Stored by the base stage; `id` is the running processed count
    Processed {
        /// Running processed count after this event
        id: u64,
    },
    /// Rejected by the allow-set
    Filtered {
        /// The event's type field (Null when absent)
        event_type: Value,
    },
}

/// Result of [`Process::process`]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Processed or filtered
    pub kind: OutcomeKind,
    /// Set by the transforming stage when its transform succeeded
    pub transformed: bool,
}

impl Outcome {
    fn processed(id: u64) -> Self {
        Self {
            kind: OutcomeKind::Processed { id },
            transformed: false,
        }
    }

    fn filtered(event_type: Value) -> Self {
        Self {
            kind: OutcomeKind::Filtered { event_type },
            transformed: false,
        }
    }

    /// Render as an ordered record
    pub fn to_record(&self) -> Record {
        let record = match &self.kind {
            OutcomeKind::Processed { id } => Record::new()
                .with("status", "processed")
                .with("id", *id as i64),
            OutcomeKind::Filtered { event_type } => Record::new()
                .with("status", "filtered")
                .with("type", event_type.clone()),
        };
        if self.transformed {
            record.with("transformed", true)
        } else {
            record
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_record())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Common capability of every stage
pub trait Process {
    /// Handle one event
    fn process(&mut self, event: &Value) -> Result<Outcome>;
}

fn require_object(event: &Value) -> Result<&Record> {
    event.as_object().ok_or(Error::InvalidShape {
        expected: "Object",
        found: event.type_name(),
    })
}

/// Base stage: validates shape and stores the event
#[derive(Debug, Default)]
pub struct EventProcessor {
    events: Vec<Record>,
    processed_count: u64,
}

impl EventProcessor {
    /// Create an empty base stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Events stored so far
    pub fn events(&self) -> &[Record] {
        &self.events
    }

    /// Number of events stored
    pub fn processed_count(&self) -> u64 {
        self.processed_count
    }
}

impl Process for EventProcessor {
    fn process(&mut self, event: &Value) -> Result<Outcome> {
        let record = require_object(event)?;
        record.require("type")?;
        self.events.push(record.clone());
        self.processed_count += 1;
        Ok(Outcome::processed(self.processed_count))
    }
}

/// Filtering stage: rejects event types outside the allow-set
#[derive(Debug)]
pub struct FilteringProcessor {
    base: EventProcessor,
    allowed_types: Vec<String>,
    filtered_count: u64,
}

impl FilteringProcessor {
    /// Create a filtering stage over a fresh base stage
    pub fn new<I, S>(allowed_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: EventProcessor::new(),
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
            filtered_count: 0,
        }
    }

    /// The wrapped base stage
    pub fn base(&self) -> &EventProcessor {
        &self.base
    }

    /// Number of events rejected by the allow-set
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count
    }

    fn allows(&self, event_type: &Value) -> bool {
        event_type
            .as_str()
            .is_some_and(|t| self.allowed_types.iter().any(|a| a == t))
    }
}

impl Process for FilteringProcessor {
    fn process(&mut self, event: &Value) -> Result<Outcome> {
        let event_type = require_object(event)?
            .get("type")
            .cloned()
            .unwrap_or(Value::Null);
        if !self.allows(&event_type) {
            self.filtered_count += 1;
            debug!(%event_type, "event filtered");
            return Ok(Outcome::filtered(event_type));
        }
        self.base.process(event)
    }
}

/// A transform failure captured by the transforming stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformError {
    /// The event the transform was applied to
    pub event: Value,
    /// Rendered transform error
    pub error: String,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"event\": {}, \"error\": {:?}}}", self.event, self.error)
    }
}

/// Event transform applied by [`TransformingProcessor`]
pub type TransformFn = Box<dyn Fn(&Value) -> Result<Value>>;

/// Transforming stage: applies a transform, then delegates to filtering
pub struct TransformingProcessor {
    inner: FilteringProcessor,
    transform: TransformFn,
    transform_errors: Vec<TransformError>,
}

impl TransformingProcessor {
    /// Create the full three-stage chain
    pub fn new<I, S>(allowed_types: I, transform: TransformFn) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: FilteringProcessor::new(allowed_types),
            transform,
            transform_errors: Vec::new(),
        }
    }

    /// Events stored by the base stage
    pub fn events(&self) -> &[Record] {
        self.inner.base().events()
    }

    /// Base stage processed count
    pub fn processed_count(&self) -> u64 {
        self.inner.base().processed_count()
    }

    /// Filtering stage rejected count
    pub fn filtered_count(&self) -> u64 {
        self.inner.filtered_count()
    }

    /// Transform failures logged so far
    pub fn transform_errors(&self) -> &[TransformError] {
        &self.transform_errors
    }
}

impl Process for TransformingProcessor {
    fn process(&mut self, event: &Value) -> Result<Outcome> {
        let _transformed = match (self.transform)(event) {
            Ok(transformed) => transformed,
            Err(e) => {
                warn!(error = %e, "transform failed");
                self.transform_errors.push(TransformError {
                    event: event.clone(),
                    error: e.to_string(),
                });
                return self.inner.process(event);
            }
        };

        // Delegates the original event, not `_transformed`.
        let mut outcome = self.inner.process(event)?;
        outcome.transformed = true;
        Ok(outcome)
    }
}

/// Add a timestamp and uppercase a text `data` field.
pub fn enrich_event(event: &Value) -> Result<Value> {
    let mut enriched = require_object(event)?.clone();
    enriched.insert("timestamp", ENRICH_TIMESTAMP);
    let upper = match enriched.get("data") {
        Some(Value::String(data)) => Some(data.to_uppercase()),
        _ => None,
    };
    if let Some(upper) = upper {
        enriched.insert("data", upper);
    }
    Ok(Value::Object(enriched))
}

/// The five sample events
pub fn sample_events() -> Vec<Value> {
    vec![
        Record::new()
            .with("type", "click")
            .with("data", "button_submit")
            .with("page", "/checkout")
            .into(),
        Record::new()
            .with("type", "view")
            .with("data", "product_page")
            .with("page", "/products/123")
            .into(),
        Record::new()
            .with("type", "hover")
            .with("data", "menu_item")
            .into(),
        Record::new()
            .with("type", "purchase")
            .with("data", "order_456")
            .with("amount", 99.99)
            .into(),
        Record::new().with("type", "click").with("data", 12345).into(),
    ]
}

/// Allow-set used by the sample chain
pub const SAMPLE_ALLOWED_TYPES: [&str; 3] = ["click", "view", "purchase"];

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Registry entry for the processor fixture
pub struct ProcessorFixture;

impl Fixture for ProcessorFixture {
    fn name(&self) -> &'static str {
        "layered_processors"
    }

    fn defect(&self) -> DefectKind {
        DefectKind::MisdirectedDelegation
    }

    fn summary(&self) -> &'static str {
        "transforming stage delegates the original event instead of the transformed one"
    }

    fn run(&self) -> FixtureReport {
        let mut report = FixtureReport::new(self.name(), self.defect());
        let mut processor =
            TransformingProcessor::new(SAMPLE_ALLOWED_TYPES, Box::new(enrich_event));

        let mut results = Vec::new();
        for event in sample_events() {
            match processor.process(&event) {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    report.fail(&e);
                    return report;
                }
            }
        }

        report.line(format!("Results: [{}]", join(&results)));
        report.line(format!("Processed: {}", processor.processed_count()));
        report.line(format!("Filtered: {}", processor.filtered_count()));
        report.line(format!(
            "Transform errors: [{}]",
            join(processor.transform_errors())
        ));
        report.line(format!("Stored events: [{}]", join(processor.events())));

        let stored_data = processor
            .events()
            .first()
            .and_then(|e| e.get("data"))
            .cloned()
            .unwrap_or(Value::Null);
        report.observe(Observation::new(
            "stored click data",
            Value::from("BUTTON_SUBMIT"),
            stored_data,
        ));
        report
    }
}

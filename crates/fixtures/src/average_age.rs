//! Average-age computation
//!
//! Sums the age of active users through the generic dynamic `add`. Charlie's
//! age is stored as text, so the accumulator hits `Int + String` and fails.
//! A statically typed control run over the same people yields 30.5.

use crate::fixture::{DefectKind, Fixture, FixtureReport, Observation};
use faultline_core::{Record, Result, Value};
use tracing::{debug, warn};

/// Average a correctly typed data set produces
pub const EXPECTED_AVERAGE_AGE: f64 = 30.5;

/// Simulate loading user data from an API.
pub fn load_users() -> Vec<Record> {
    vec![
        Record::new().with("name", "Alice").with("age", 30).with("active", true),
        Record::new().with("name", "Bob").with("age", 25).with("active", true),
        Record::new().with("name", "Charlie").with("age", "35").with("active", true),
        Record::new().with("name", "Diana").with("age", 28).with("active", false),
        Record::new().with("name", "Eve").with("age", 32).with("active", true),
    ]
}

/// Average age of active users, or 0 when there are none.
///
/// # Errors
///
/// Returns [`faultline_core::Error::TypeMismatch`] when an age is not a
/// number, and [`faultline_core::Error::MissingField`] when a user lacks
/// `active` or `age`.
pub fn calculate_average_age(users: &[Record]) -> Result<f64> {
    let mut total = Value::Int(0);
    let mut count = 0u32;
    for user in users {
        if user.require("active")?.as_bool() != Some(true) {
            continue;
        }
        let age = user.require("age")?;
        let name = user.get("name").unwrap_or(&Value::Null);
        total = total.add(age).map_err(|e| {
            warn!(user = %name, error = %e, "age accumulation failed");
            e
        })?;
        count += 1;
    }
    debug!(%total, count, "ages accumulated");
    if count == 0 {
        return Ok(0.0);
    }
    Ok(total.as_number().unwrap_or_default() / f64::from(count))
}

/// A user with a statically typed age
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedUser {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Whether the user counts toward the average
    pub active: bool,
}

impl TypedUser {
    fn new(name: &str, age: i64, active: bool) -> Self {
        Self {
            name: name.to_string(),
            age,
            active,
        }
    }
}

/// The same people with every age typed as an integer.
pub fn load_typed_users() -> Vec<TypedUser> {
    vec![
        TypedUser::new("Alice", 30, true),
        TypedUser::new("Bob", 25, true),
        TypedUser::new("Charlie", 35, true),
        TypedUser::new("Diana", 28, false),
        TypedUser::new("Eve", 32, true),
    ]
}

/// Average age of active typed users, or 0 when there are none.
pub fn calculate_average_age_typed(users: &[TypedUser]) -> f64 {
    let (total, count) = users
        .iter()
        .filter(|u| u.active)
        .fold((0i64, 0u32), |(total, count), u| (total + u.age, count + 1));
    if count == 0 {
        return 0.0;
    }
    total as f64 / f64::from(count)
}

/// Registry entry for the average-age fixture
pub struct AverageAgeFixture;

impl Fixture for AverageAgeFixture {
    fn name(&self) -> &'static str {
        "average_age"
    }

    fn defect(&self) -> DefectKind {
        DefectKind::TypeCoercion
    }

    fn summary(&self) -> &'static str {
        "one age stored as text breaks a generic additive accumulator"
    }

    fn run(&self) -> FixtureReport {
        let mut report = FixtureReport::new(self.name(), self.defect());

        let typed = calculate_average_age_typed(&load_typed_users());
        report.line(format!("Average age of active users (typed): {:.1}", typed));

        let actual = match calculate_average_age(&load_users()) {
            Ok(avg) => {
                report.line(format!("Average age of active users: {}", avg));
                avg.to_string()
            }
            Err(e) => {
                report.fail(&e);
                format!("error: {}", e)
            }
        };
        report.observe(Observation::new("average age", EXPECTED_AVERAGE_AGE, actual));
        report
    }
}

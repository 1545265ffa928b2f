//! Seeded-defect fixtures for faultline
//!
//! Each module is a self-contained fixture with one intentional logic defect:
//! - pipeline: text quantity admitted by a lexicographic filter (type coercion)
//! - average_age: text age in a generic accumulator (type coercion)
//! - processors: stage delegates the original event (misdirected delegation)
//! - closures: closures share a loop cell (late-binding capture)
//! - transfer: check1, check2, act1, act2 on one account (stale read)
//! - tree: depth advances on the left branch only (off-by-one recursion)
//!
//! The fixture format and registry live in [`fixture`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod average_age;
pub mod closures;
pub mod fixture;
pub mod pipeline;
pub mod processors;
pub mod transfer;
pub mod tree;

pub use fixture::{all_fixtures, find_fixture, DefectKind, Fixture, FixtureReport, Observation};

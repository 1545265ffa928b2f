//! faultline - seeded-defect fixtures for bug-detection tooling
//!
//! Six self-contained fixtures, each carrying one intentional logic defect,
//! plus the report format an external tool can consume.
//!
//! # Quick Start
//!
//! ```
//! use faultline::{all_fixtures, Fixture};
//!
//! for fixture in all_fixtures() {
//!     let report = fixture.run();
//!     assert!(report.defect_reproduced());
//! }
//! ```
//!
//! # Architecture
//!
//! Dynamic values, records and errors come from `faultline-core`; the
//! fixtures and their registry from `faultline-fixtures`. Both are re-exported
//! here.

pub use faultline_core::{Error, FaultlineConfig, OutputMode, Record, Result, Value};
pub use faultline_fixtures::*;

//! Core types for faultline
//!
//! This crate defines the foundational types shared by every fixture:
//! - Value: Dynamic value enum with explicit, non-coercing arithmetic
//! - Record: Ordered field map used for records, users and events
//! - Error: Error type hierarchy
//! - Config: `faultline.toml` runner configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;
pub mod value;

pub use config::{FaultlineConfig, OutputMode, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use record::Record;
pub use value::Value;

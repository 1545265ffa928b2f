//! Error types for faultline
//!
//! This module defines all error types surfaced by the fixtures and their
//! runner. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use std::io;
use thiserror::Error;

/// Result type alias for faultline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for faultline
#[derive(Debug, Error)]
pub enum Error {
    /// Arithmetic or comparison between operand types with no defined rule
    #[error("Type mismatch: cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        /// Operation name (e.g. "+", "*")
        op: &'static str,
        /// Type name of the left operand
        left: &'static str,
        /// Type name of the right operand
        right: &'static str,
    },

    /// A required field was absent from a record
    #[error("Missing required field '{0}'")]
    MissingField(String),

    /// A value had the wrong shape (e.g. an event that is not an object)
    #[error("Invalid shape: expected {expected}, got {found}")]
    InvalidShape {
        /// Expected type name
        expected: &'static str,
        /// Type name actually found
        found: &'static str,
    },

    /// Fixture name not present in the registry
    #[error("Unknown fixture: {0}")]
    UnknownFixture(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error is one a fixture's seeded defect is expected to raise.
    pub fn is_defect_failure(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. } | Error::MissingField(_) | Error::InvalidShape { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_type_mismatch() {
        let err = Error::TypeMismatch {
            op: "+",
            left: "Int",
            right: "String",
        };
        let msg = err.to_string();
        assert!(msg.contains("Type mismatch"));
        assert!(msg.contains("'+' to Int and String"));
    }

    #[test]
    fn test_error_display_missing_field() {
        let err = Error::MissingField("type".to_string());
        assert_eq!(err.to_string(), "Missing required field 'type'");
    }

    #[test]
    fn test_error_display_invalid_shape() {
        let err = Error::InvalidShape {
            expected: "Object",
            found: "String",
        };
        let msg = err.to_string();
        assert!(msg.contains("expected Object"));
        assert!(msg.contains("got String"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_defect_failure());
    }

    #[test]
    fn test_defect_failures() {
        assert!(Error::MissingField("type".into()).is_defect_failure());
        assert!(Error::TypeMismatch {
            op: "*",
            left: "Float",
            right: "String"
        }
        .is_defect_failure());
        assert!(!Error::UnknownFixture("nope".into()).is_defect_failure());
        assert!(!Error::Config("bad".into()).is_defect_failure());
    }
}

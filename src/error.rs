//! Error types for planning operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::{ValidationError, ValidationWarning};

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or scheduling a task set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Validation found blocking defects. Carries every finding of the run.
    #[error("task set failed validation with {} error(s): {}", .errors.len(), summary(.errors))]
    Invalid {
        /// Blocking defects.
        errors: Vec<ValidationError>,
        /// Non-blocking findings of the same run.
        warnings: Vec<ValidationWarning>,
    },

    /// A computed date fell outside the representable calendar range.
    #[error("date out of range for task '{task}': {base} + {days} day(s)")]
    DateOutOfRange {
        /// Task whose date could not be computed.
        task: String,
        /// Base date of the computation.
        base: NaiveDate,
        /// Day offset applied to the base.
        days: i64,
    },
}

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

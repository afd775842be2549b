use std::fmt;

use thiserror::Error;

/// Which half of a filter selection was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyField {
    Months,
    Weekdays,
}

impl fmt::Display for EmptyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyField::Months => write!(f, "months"),
            EmptyField::Weekdays => write!(f, "days"),
        }
    }
}

/// Domain failures surfaced by the loading / filtering / statistics pipeline.
///
/// `UnknownCity` and `EmptySelection` end the session; `SchemaMismatch` and
/// `EmptyResult` are rendered as "not available" lines in the report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BikeShareError {
    #[error("unknown city '{0}' (expected Chicago, New York or Washington)")]
    UnknownCity(String),

    #[error("No {0} were selected.")]
    EmptySelection(EmptyField),

    #[error("dataset has no '{0}' column")]
    SchemaMismatch(String),

    #[error("no trips match the selected filters")]
    EmptyResult,
}

//! Validation error types

use std::fmt;

/// Validation error for item fields
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field is below zero
    Negative { field: &'static str },

    /// Numeric field is NaN or infinite
    NotFinite { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Negative { field } => write!(f, "{} must not be negative", field),
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
        }
    }
}

impl std::error::Error for ValidationError {}

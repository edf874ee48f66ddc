//! Engine error type

use thiserror::Error;

/// Raised when an argument falls outside its closed enumeration or fails a
/// positivity precondition. Carries the offending field, never user-facing prose.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("unknown {field}: {value:?}")]
    UnknownValue { field: &'static str, value: String },
}

impl InvalidInputError {
    pub fn unknown(field: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            field,
            value: value.to_string(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotPositive { field, .. } | Self::UnknownValue { field, .. } => field,
        }
    }
}

/// Fail unless `value` is finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, InvalidInputError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidInputError::NotPositive { field, value })
    }
}

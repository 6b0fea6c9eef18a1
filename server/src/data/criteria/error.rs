//! Criteria error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Invalid value '{value}' for {field}.{operator}: expected {expected}")]
    InvalidOperand {
        field: String,
        operator: String,
        value: String,
        expected: &'static str,
    },

    #[error("Operator '{operator}' is not supported on {kind} field '{field}'")]
    UnsupportedOperator {
        field: String,
        operator: String,
        kind: &'static str,
    },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Too many filter parameters (maximum {max})")]
    TooManyFilters { max: usize },
}

impl CriteriaError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "UNKNOWN_FIELD",
            Self::InvalidOperand { .. } => "INVALID_OPERAND",
            Self::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::TooManyFilters { .. } => "TOO_MANY_FILTERS",
        }
    }
}

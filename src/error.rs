//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
///
/// Parsing never produces one of these; only evaluation (and decoding of
/// records or rule sets) can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("Malformed condition: {0:?} needs a field, an operator and a value")]
    MalformedCondition(String),

    #[error("Cannot compare {field:?} numerically: {value:?} is not a number")]
    NumericCoercion { field: String, value: String },

    #[error("Invalid argument: cannot evaluate an empty rule combination")]
    EmptyCombination,

    #[error("Unknown logical operator: {0}")]
    UnknownLogicalOperator(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for RuleError {
    fn from(err: serde_json::Error) -> Self {
        RuleError::Deserialization(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<RuleError> for pyo3::PyErr {
    fn from(err: RuleError) -> pyo3::PyErr {
        use pyo3::exceptions::PyValueError;
        PyValueError::new_err(err.to_string())
    }
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleError>;

//! Error types for the valuation model

use thiserror::Error;

/// Failures raised by rate, cash flow and formula construction or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Time unit code outside Y/M/W/D
    #[error("invalid time unit '{0}': time frame must be Y/M/W/D")]
    InvalidUnit(String),

    /// Mathematically undefined or degenerate input
    #[error("domain error: {0}")]
    Domain(String),

    /// Chance of zero outside [0, 1]
    #[error("chance of zero must be between 0 and 1, got {0}")]
    ProbabilityOutOfRange(f64),
}

impl ValuationError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        ValuationError::Domain(msg.into())
    }
}

pub type ValuationResult<T> = Result<T, ValuationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValuationError::InvalidUnit("X".to_string());
        assert_eq!(err.to_string(), "invalid time unit 'X': time frame must be Y/M/W/D");

        let err = ValuationError::domain("growth rate must not equal discount rate");
        assert_eq!(err.to_string(), "domain error: growth rate must not equal discount rate");

        let err = ValuationError::ProbabilityOutOfRange(1.5);
        assert!(err.to_string().contains("1.5"));
    }
}

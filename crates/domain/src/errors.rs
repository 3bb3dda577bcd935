//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Threshold policy violates `max_submissions >= 1` or `window > 0`
    #[error("Invalid threshold policy: {0}")]
    InvalidThresholdPolicy(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_threshold_policy_message() {
        let err = DomainError::InvalidThresholdPolicy("window must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid threshold policy: window must be positive"
        );
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}

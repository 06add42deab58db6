//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Configuration variants are fatal and must surface before any agent is
/// invoked. `NoConsensus` is the only error the aggregator may raise.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Panel has no evaluator")]
    MissingEvaluator,

    #[error("Panel has more than one evaluator")]
    MultipleEvaluators,

    #[error("Panel has no expert")]
    MissingExpert,

    #[error("Rubric weights sum to {sum}, expected 1.0")]
    InvalidWeights { sum: f64 },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No consensus: scoring matrix is empty after corrections")]
    NoConsensus,
}

impl DomainError {
    /// Check if this error is a pre-run configuration failure
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::MissingEvaluator
                | DomainError::MultipleEvaluators
                | DomainError::MissingExpert
                | DomainError::InvalidWeights { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_check() {
        assert!(DomainError::MissingEvaluator.is_configuration());
        assert!(DomainError::InvalidWeights { sum: 0.9 }.is_configuration());
        assert!(!DomainError::NoConsensus.is_configuration());
    }

    #[test]
    fn test_no_consensus_display() {
        let error = DomainError::NoConsensus;
        assert!(error.to_string().contains("No consensus"));
    }
}

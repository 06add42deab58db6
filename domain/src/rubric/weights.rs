//! Rubric weight table

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Tolerance for the weight-sum invariant
const SUM_TOLERANCE: f64 = 1e-9;

/// Weights applied to the five rubric dimensions
///
/// The weights must sum to 1.0; [`RubricWeights::validate`] enforces this
/// before any agent is invoked. The default table mirrors the council's
/// standing rubric.
///
/// # Example
///
/// ```
/// use council_domain::rubric::RubricWeights;
///
/// let weights = RubricWeights::default();
/// assert!(weights.validate().is_ok());
/// assert_eq!(weights.accuracy, 0.35);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricWeights {
    pub accuracy: f64,
    pub completeness: f64,
    pub grounding: f64,
    pub reasoning: f64,
    pub clarity: f64,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            accuracy: 0.35,
            completeness: 0.25,
            grounding: 0.20,
            reasoning: 0.15,
            clarity: 0.05,
        }
    }
}

impl RubricWeights {
    /// Sum over all five dimensions
    pub fn sum(&self) -> f64 {
        self.accuracy + self.completeness + self.grounding + self.reasoning + self.clarity
    }

    /// Check the weights-sum-to-one invariant
    pub fn validate(&self) -> Result<(), DomainError> {
        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DomainError::InvalidWeights { sum });
        }
        Ok(())
    }
}

//! Council run phases

use serde::{Deserialize, Serialize};

/// Phases of a council run, in execution order
///
/// Generation and audit are sequential; scoring is the pooled,
/// partial-failure-tolerant phase. The corrector and aggregator run
/// strictly after every scoring attempt has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Experts produce candidate responses
    Generation,
    /// Every scorer judges every candidate
    Scoring,
    /// The evaluator inspects the matrix for bias
    Audit,
    /// Corrected scores are averaged and a winner selected
    Aggregation,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generation => "generation",
            Phase::Scoring => "scoring",
            Phase::Audit => "audit",
            Phase::Aggregation => "aggregation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Generation.to_string(), "generation");
        assert_eq!(Phase::Aggregation.to_string(), "aggregation");
    }
}

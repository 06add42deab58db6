//! Rubric weight overrides from TOML (`[weights]` section)
//!
//! Each dimension can be overridden independently; unset dimensions keep
//! the standing rubric's value. The sum-to-1.0 invariant is checked at
//! run start, not at load time.

use council_domain::RubricWeights;
use serde::{Deserialize, Serialize};

/// Rubric weight configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeightsConfig {
    pub accuracy: Option<f64>,
    pub completeness: Option<f64>,
    pub grounding: Option<f64>,
    pub reasoning: Option<f64>,
    pub clarity: Option<f64>,
}

impl FileWeightsConfig {
    /// Merge overrides onto the default weight table
    pub fn to_weights(&self) -> RubricWeights {
        let defaults = RubricWeights::default();
        RubricWeights {
            accuracy: self.accuracy.unwrap_or(defaults.accuracy),
            completeness: self.completeness.unwrap_or(defaults.completeness),
            grounding: self.grounding.unwrap_or(defaults.grounding),
            reasoning: self.reasoning.unwrap_or(defaults.reasoning),
            clarity: self.clarity.unwrap_or(defaults.clarity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        assert!(FileWeightsConfig::default().to_weights().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config: FileWeightsConfig = toml::from_str("accuracy = 0.5").unwrap();
        let weights = config.to_weights();
        assert_eq!(weights.accuracy, 0.5);
        assert_eq!(weights.grounding, 0.20);
        // The resulting table no longer sums to 1.0 and must fail later
        assert!(weights.validate().is_err());
    }
}

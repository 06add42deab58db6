//! Scoring engine settings from TOML (`[scoring]` section)

use council_application::ScoringParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Worker pool bound
    pub concurrency: usize,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 600,
            concurrency: 4,
        }
    }
}

impl FileScoringConfig {
    /// Convert into application-layer parameters
    pub fn to_params(&self) -> ScoringParams {
        ScoringParams::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_concurrency(self.concurrency)
    }
}

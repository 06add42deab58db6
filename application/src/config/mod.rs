//! Scoring parameters for the scoring engine.
//!
//! [`ScoringParams`] groups the static parameters that control the pooled
//! scoring phase in
//! [`RunCouncilUseCase`](crate::use_cases::run_council::RunCouncilUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scoring engine control parameters.
///
/// Controls the per-call timeout, the worker pool bound, and the optional
/// single-scorer diagnostic filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Per-call timeout for one (scorer, response) invocation.
    pub timeout: Duration,
    /// Worker pool bound for concurrent scoring calls.
    pub concurrency: usize,
    /// When set, only the scorer with this id runs; all others are
    /// skipped entirely (single-scorer diagnostic runs).
    pub only_scorer: Option<String>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            concurrency: 4,
            only_scorer: None,
        }
    }
}

impl ScoringParams {
    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_only_scorer(mut self, scorer_id: impl Into<String>) -> Self {
        self.only_scorer = Some(scorer_id.into());
        self
    }
}

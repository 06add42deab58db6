//! Audit report types
//!
//! The evaluator inspects the full scoring matrix once per run and emits
//! a correction directive of informational flags, normalization
//! factors, and scorer drops. The wire format is lenient: every field
//! defaults, severity stays free text, and unknown fields (the auditor
//! may echo an adjusted matrix of its own) are ignored.

use crate::extract::{self, ExtractError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One detected scoring anomaly
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditFlag {
    /// The scorer the anomaly was detected on
    pub scorer_id: String,
    /// Free-text description, e.g. "consistent mutual upvoting with expert_3"
    pub issue: String,
    /// Free-text severity, e.g. "medium"
    pub severity: String,
}

/// The evaluator's correction directive over a scoring matrix
///
/// Application order is fixed: normalization factors multiply every
/// recorded total of the named scorer in place, then dropped scorers are
/// removed entirely. A scorer mentioned in neither map is untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditReport {
    /// Auditor-chosen run identifier
    pub audit_id: String,
    /// Informational flags; no matrix mutation on their own
    pub flags: Vec<AuditFlag>,
    /// Multiplicative per-scorer correction factors
    pub normalization: BTreeMap<String, f64>,
    /// Scorers removed from aggregation for this run
    pub drops: Vec<String>,
    /// One-paragraph summary of why adjustments were made
    pub explanation: String,
}

impl AuditReport {
    /// Parse a raw evaluator response into a report.
    ///
    /// Uses the same lenient extraction as scoring output. The caller
    /// decides what a failure means; the run-level policy is to proceed
    /// uncorrected rather than abort.
    pub fn from_model_output(text: &str) -> Result<Self, ExtractError> {
        let value = extract::parse_object(text)?;
        let report: AuditReport = serde_json::from_value(value)?;
        Ok(report)
    }

    /// Whether the report requests any matrix mutation at all
    pub fn is_identity(&self) -> bool {
        self.drops.is_empty()
            && self
                .normalization
                .values()
                .all(|f| (f - 1.0).abs() < f64::EPSILON)
    }
}

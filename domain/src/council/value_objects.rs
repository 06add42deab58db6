//! Council value objects - immutable records produced by a run.
//!
//! - [`ResponseId`] - candidate identifier derived from panel position
//! - [`CandidateResponse`] - one expert's answer to the query
//! - [`CouncilOutcome`] - complete result of a council run

use crate::audit::AuditReport;
use crate::rubric::ScoringMatrix;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Identifier of a candidate response
///
/// Derived from the producing agent's position in the *full* panel
/// ordering, evaluator slot included, and rendered as `r_<index>`. With
/// panel `[expert, evaluator, expert]` the generated ids are `r_0` and
/// `r_2`, so identifiers may be non-contiguous. Ordering follows the panel
/// index, which drives the deterministic tie-break during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResponseId(usize);

impl ResponseId {
    /// Create an id from a panel position
    pub fn from_panel_index(index: usize) -> Self {
        Self(index)
    }

    /// The originating panel position
    pub fn panel_index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r_{}", self.0)
    }
}

impl std::str::FromStr for ResponseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .strip_prefix("r_")
            .ok_or_else(|| format!("Response id must look like r_<n>: {}", s))?
            .parse::<usize>()
            .map_err(|_| format!("Response id must look like r_<n>: {}", s))?;
        Ok(Self(index))
    }
}

// Serialized as the wire string "r_<n>" so matrix keys stay readable
impl Serialize for ResponseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResponseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One expert's candidate answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    /// Identifier derived from panel position
    pub response_id: ResponseId,
    /// Stable id of the producing agent
    pub model_id: String,
    /// Raw response text
    pub text: String,
}

impl CandidateResponse {
    pub fn new(
        response_id: ResponseId,
        model_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            response_id,
            model_id: model_id.into(),
            text: text.into(),
        }
    }
}

/// Complete result of a council run
///
/// Everything a caller needs to display or persist the run: candidates,
/// the corrected matrix, the audit report (absent when the audit output
/// failed extraction and the run proceeded uncorrected), per-response
/// averages, and the winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilOutcome {
    /// The original user query
    pub query: String,
    /// Panel member names, in panel order
    pub panel: Vec<String>,
    /// All candidate responses, in generation order
    pub responses: Vec<CandidateResponse>,
    /// Scoring matrix after audit corrections
    pub matrix: ScoringMatrix,
    /// Audit report, when the evaluator's output parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditReport>,
    /// Post-correction per-response averages
    pub averages: BTreeMap<ResponseId, f64>,
    /// The winning response id
    pub winner: ResponseId,
}

impl CouncilOutcome {
    /// The winning candidate response
    pub fn winning_response(&self) -> Option<&CandidateResponse> {
        self.responses.iter().find(|r| r.response_id == self.winner)
    }

    /// Whether the audit step produced usable corrections
    pub fn was_audited(&self) -> bool {
        self.audit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_id_display_roundtrip() {
        let id = ResponseId::from_panel_index(2);
        assert_eq!(id.to_string(), "r_2");
        assert_eq!("r_2".parse::<ResponseId>().unwrap(), id);
    }

    #[test]
    fn test_response_id_parse_rejects_garbage() {
        assert!("response_2".parse::<ResponseId>().is_err());
        assert!("r_two".parse::<ResponseId>().is_err());
    }

    #[test]
    fn test_response_id_orders_by_panel_index() {
        let r2 = ResponseId::from_panel_index(2);
        let r10 = ResponseId::from_panel_index(10);
        // Index order, not lexicographic ("r_10" < "r_2" as strings)
        assert!(r2 < r10);
    }

    #[test]
    fn test_response_id_json_is_wire_string() {
        let id = ResponseId::from_panel_index(0);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"r_0\"");
        let back: ResponseId = serde_json::from_str("\"r_0\"").unwrap();
        assert_eq!(back, id);
    }
}

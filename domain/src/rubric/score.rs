//! Rubric scores and per-candidate score records

use super::weights::RubricWeights;
use crate::extract::{self, ExtractError};
use serde::{Deserialize, Serialize};

/// The five rubric dimensions as scored by a single scorer
///
/// Each dimension is nominally in `[1, 5]`. A missing or `null` value from
/// the scoring agent deserializes to 0, deliberately not clamped to 1, so
/// zero can signal "unparseable/unscored" downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricScore {
    pub accuracy: i64,
    pub completeness: i64,
    pub grounding: i64,
    pub reasoning: i64,
    pub clarity: i64,
}

impl RubricScore {
    /// Weighted sum over the five dimensions
    pub fn weighted_total(&self, weights: &RubricWeights) -> f64 {
        weights.accuracy * self.accuracy as f64
            + weights.completeness * self.completeness as f64
            + weights.grounding * self.grounding as f64
            + weights.reasoning * self.reasoning as f64
            + weights.clarity * self.clarity as f64
    }
}

/// A complete scoring judgment for one (scorer, response) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Per-dimension rubric scores
    pub scores: RubricScore,
    /// Scorer's own confidence, 0.0 to 1.0
    pub confidence_estimate: f64,
    /// One-sentence justification for the total
    pub justification: String,
    /// Weighted total over the rubric dimensions
    pub total: f64,
}

/// Wire shape of a scorer's response, before weighting
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawScoreOutput {
    scores: RubricScore,
    confidence_estimate: f64,
    justification: String,
}

impl ScoreRecord {
    /// Build a record from parsed scores, computing the weighted total
    pub fn new(
        scores: RubricScore,
        confidence_estimate: f64,
        justification: impl Into<String>,
        weights: &RubricWeights,
    ) -> Self {
        Self {
            total: scores.weighted_total(weights),
            scores,
            confidence_estimate,
            justification: justification.into(),
        }
    }

    /// Parse a raw scorer response into a weighted record.
    ///
    /// Runs the lenient extractor over the free-form text, then a strict
    /// structural parse. Missing fields default (dimensions to 0), but a
    /// fragment that is not a JSON object at all is an error the caller
    /// turns into a matrix absence.
    pub fn from_model_output(text: &str, weights: &RubricWeights) -> Result<Self, ExtractError> {
        let value = extract::parse_object(text)?;
        let raw: RawScoreOutput = serde_json::from_value(value)?;
        Ok(Self::new(
            raw.scores,
            raw.confidence_estimate,
            raw.justification,
            weights,
        ))
    }
}

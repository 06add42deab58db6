//! Sparse scoring matrix
//!
//! Maps scorer id -> response id -> score record. The matrix is sparse by
//! contract: a (scorer, response) pair that timed out or failed extraction
//! is absent, never zero-filled. `BTreeMap` keys keep iteration and
//! serialization deterministic regardless of scoring completion order.

use super::score::ScoreRecord;
use crate::audit::AuditReport;
use crate::council::value_objects::ResponseId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sparse per-scorer, per-response score table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringMatrix {
    rows: BTreeMap<String, BTreeMap<ResponseId, ScoreRecord>>,
}

impl ScoringMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful scoring attempt
    pub fn insert(
        &mut self,
        scorer_id: impl Into<String>,
        response_id: ResponseId,
        record: ScoreRecord,
    ) {
        self.rows
            .entry(scorer_id.into())
            .or_default()
            .insert(response_id, record);
    }

    /// All scorer rows, in id order
    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<ResponseId, ScoreRecord>)> {
        self.rows.iter()
    }

    /// Entries recorded for one scorer
    pub fn row(&self, scorer_id: &str) -> Option<&BTreeMap<ResponseId, ScoreRecord>> {
        self.rows.get(scorer_id)
    }

    /// A single (scorer, response) entry
    pub fn get(&self, scorer_id: &str, response_id: ResponseId) -> Option<&ScoreRecord> {
        self.rows.get(scorer_id)?.get(&response_id)
    }

    /// True when no scorer has any entry
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(|row| row.is_empty())
    }

    /// Total number of recorded entries
    pub fn entry_count(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    /// Every response id with at least one entry
    pub fn response_ids(&self) -> BTreeSet<ResponseId> {
        self.rows
            .values()
            .flat_map(|row| row.keys().copied())
            .collect()
    }

    /// Multiply every recorded total of one scorer by `factor`, in place
    pub fn normalize_scorer(&mut self, scorer_id: &str, factor: f64) {
        if let Some(row) = self.rows.get_mut(scorer_id) {
            for record in row.values_mut() {
                record.total *= factor;
            }
        }
    }

    /// Remove a scorer's entire row
    pub fn drop_scorer(&mut self, scorer_id: &str) {
        self.rows.remove(scorer_id);
    }

    /// Apply an audit correction directive.
    ///
    /// Normalization first, drops second: a scorer can be normalized and
    /// then still dropped; its normalized row is simply discarded. Scorers
    /// mentioned in neither map are untouched.
    pub fn apply_audit(&mut self, report: &AuditReport) {
        for (scorer_id, factor) in &report.normalization {
            self.normalize_scorer(scorer_id, *factor);
        }
        for scorer_id in &report.drops {
            self.drop_scorer(scorer_id);
        }
    }
}

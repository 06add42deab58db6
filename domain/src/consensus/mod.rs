//! Aggregation and winner selection
//!
//! Recomputes per-response averages from the corrected matrix and picks
//! the winning response deterministically. Averages are count-based means
//! over the entries actually present: a response scored by fewer
//! surviving scorers is still averaged, not penalized for absences.

use crate::core::error::DomainError;
use crate::council::value_objects::ResponseId;
use crate::rubric::matrix::ScoringMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated consensus over a corrected matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consensus {
    /// Arithmetic mean of totals per response, over present entries only
    pub averages: BTreeMap<ResponseId, f64>,
    /// Response with the maximal average; ties break to the earliest
    /// panel index
    pub winner: ResponseId,
}

/// Aggregate a corrected matrix into averages and a winner.
///
/// Fails with [`DomainError::NoConsensus`] when the matrix has no entries
/// left (every scorer dropped or every score unparseable). The caller
/// must surface "no answer" rather than pick arbitrarily.
pub fn aggregate(matrix: &ScoringMatrix) -> Result<Consensus, DomainError> {
    let mut sums: BTreeMap<ResponseId, (f64, usize)> = BTreeMap::new();

    for (_, row) in matrix.rows() {
        for (response_id, record) in row {
            let entry = sums.entry(*response_id).or_insert((0.0, 0));
            entry.0 += record.total;
            entry.1 += 1;
        }
    }

    let averages: BTreeMap<ResponseId, f64> = sums
        .into_iter()
        .map(|(id, (sum, count))| (id, sum / count as f64))
        .collect();

    // Ascending id iteration + strict comparison: the earliest panel index
    // wins ties by construction.
    let winner = averages
        .iter()
        .fold(None::<(ResponseId, f64)>, |best, (&id, &avg)| match best {
            Some((_, best_avg)) if avg <= best_avg => best,
            _ => Some((id, avg)),
        })
        .map(|(id, _)| id)
        .ok_or(DomainError::NoConsensus)?;

    Ok(Consensus { averages, winner })
}

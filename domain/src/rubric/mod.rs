//! Rubric types for candidate scoring
//!
//! The rubric is five weighted judgment dimensions. Scorers return one
//! [`score::ScoreRecord`] per candidate; records are collected into a
//! sparse [`matrix::ScoringMatrix`] keyed by scorer and response.

pub mod matrix;
pub mod score;
pub mod weights;

pub use matrix::ScoringMatrix;
pub use score::{RubricScore, ScoreRecord};
pub use weights::RubricWeights;

//! Error types surfaced by the match engine

use thiserror::Error;

use crate::weights::WeightError;

/// Both variants describe bad caller input; scoring itself never fails
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid student profile: {0}")]
    InvalidProfile(String),

    #[error("invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),
}

//! Top-N ranking of scored colleges

use crate::normalizer::{compute_population_stats, normalize_student};
use crate::scoring::score_college;
use crate::types::*;
use crate::weights::WeightVector;

/// Score every college for one student and keep the best `top_n`.
///
/// Population statistics come from this call's colleges only. The sort is
/// stable, so equal scores keep their input order.
pub fn rank(
    student: &StudentProfile,
    colleges: &[CollegeCandidate],
    weights: &WeightVector,
    strategy: Strategy,
    top_n: usize,
) -> Vec<ScoredCollege> {
    if colleges.is_empty() || top_n == 0 {
        return vec![];
    }

    let stats = compute_population_stats(colleges);
    let normalized = normalize_student(student, colleges, stats);

    let mut scored: Vec<ScoredCollege> = colleges
        .iter()
        .map(|college| score_college(&normalized, college, weights, strategy))
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}

//! College predictor: an immutable weight snapshot plus the ranking entry point

use crate::error::MatchError;
use crate::normalizer::{normalize_student, PopulationStats};
use crate::ranking::rank;
use crate::scoring::score_college;
use crate::types::*;
use crate::weights::{category_preset, factor_preset, CategoryWeights, FactorWeights, WeightVector};

#[derive(Debug, Clone)]
pub struct CollegePredictor {
    weights: WeightVector,
    strategy: Strategy,
    top_n: usize,
}

impl Default for CollegePredictor {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            strategy: Strategy::Weighted,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl CollegePredictor {
    /// Build from presets and overrides. Presets are resolved first, overrides merged on top.
    pub fn new(options: &RankOptions) -> Result<Self, MatchError> {
        let factors = match options.preset.as_deref() {
            Some(name) => factor_preset(name)?,
            None => FactorWeights::default(),
        };
        let categories = match options.category_preset.as_deref() {
            Some(name) => category_preset(name)?,
            None => CategoryWeights::default(),
        };
        let weights = WeightVector::new(
            factors,
            categories,
            options.weights.as_ref(),
            options.category_weights.as_ref(),
        )?;

        Ok(Self {
            weights,
            strategy: options.strategy,
            top_n: options.top_n.unwrap_or(DEFAULT_TOP_N),
        })
    }

    pub fn with_weights(weights: WeightVector, strategy: Strategy, top_n: usize) -> Self {
        Self { weights, strategy, top_n }
    }

    pub fn weights(&self) -> WeightVector {
        self.weights
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Score a single college against an explicit batch context
    pub fn score(
        &self,
        student: &StudentProfile,
        college: &CollegeCandidate,
        batch: &[CollegeCandidate],
        stats: Option<PopulationStats>,
    ) -> ScoredCollege {
        let normalized = normalize_student(student, batch, stats);
        score_college(&normalized, college, &self.weights, self.strategy)
    }

    pub fn rank(&self, student: &StudentProfile, colleges: &[CollegeCandidate]) -> Vec<ScoredCollege> {
        rank(student, colleges, &self.weights, self.strategy, self.top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::compute_population_stats;

    #[test]
    fn test_unknown_preset_is_invalid_weights() {
        let options = RankOptions {
            preset: Some("exotic".to_string()),
            ..Default::default()
        };
        let err = CollegePredictor::new(&options).unwrap_err();
        assert!(matches!(err, MatchError::InvalidWeights(_)));
    }

    #[test]
    fn test_default_top_n() {
        let predictor = CollegePredictor::new(&RankOptions::default()).unwrap();
        assert_eq!(predictor.top_n(), DEFAULT_TOP_N);

        let colleges: Vec<CollegeCandidate> = (0..6).map(|i| CollegeCandidate::named(format!("c{i}"))).collect();
        assert_eq!(predictor.rank(&StudentProfile::default(), &colleges).len(), 4);
    }

    #[test]
    fn test_score_matches_rank() {
        let predictor = CollegePredictor::default();
        let student = StudentProfile {
            sat_score: 1250.0,
            cgpa: 3.4,
            ..Default::default()
        };
        let colleges = vec![CollegeCandidate {
            avg_sat: Some(1300.0),
            avg_gpa: Some(3.5),
            avg_extracurriculars: Some(6.0),
            ..CollegeCandidate::named("Solo")
        }];
        let single = predictor.score(&student, &colleges[0], &colleges, compute_population_stats(&colleges));
        let ranked = predictor.rank(&student, &colleges);
        assert_eq!(ranked, vec![single]);
    }
}

//! Normalization of raw student attributes into comparable [0,1] features
//!
//! Bounded scales (SAT, GPA, award/test counts, budget) use min-max
//! normalization. The extracurricular count is z-scored against the
//! candidate colleges passed to the same call, so the normalized student
//! depends on which colleges were supplied. Missing data maps to 0.5.

use crate::types::{CollegeCandidate, StudentProfile};

pub const SAT_MIN: f64 = 400.0;
pub const SAT_MAX: f64 = 1600.0;
pub const GPA_MAX: f64 = 4.0;

/// Assumed activity count for a college that does not report one
pub const DEFAULT_AVG_EXTRACURRICULARS: f64 = 5.0;

const Z_SCORE_RANGE: f64 = 2.0;
const AWARDS_MAX: f64 = 10.0;
const TESTS_MAX: f64 = 5.0;

pub const NEUTRAL: f64 = 0.5;

/// Min-max normalization, clamped to [0,1]. A degenerate range is neutral.
pub fn normalize_bounded(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return NEUTRAL;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Standard score; zero spread yields 0
pub fn normalize_z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    (value - mean) / std_dev
}

/// Mean and population standard deviation of college activity counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// First phase: summarize the candidate batch. None when no college yields a usable value.
pub fn compute_population_stats(colleges: &[CollegeCandidate]) -> Option<PopulationStats> {
    let values: Vec<f64> = colleges
        .iter()
        .map(|c| c.avg_extracurriculars.unwrap_or(DEFAULT_AVG_EXTRACURRICULARS))
        .filter(|v| *v > 0.0)
        .collect();

    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Some(PopulationStats {
        mean,
        std_dev: variance.sqrt(),
        count,
    })
}

/// Student features after normalization, all in [0,1]
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStudent {
    pub sat: Option<f64>,           // None when the student reported no SAT
    pub gpa: Option<f64>,
    pub subject_grades: f64,
    pub extracurriculars: f64,
    pub awards: f64,
    pub standardized_tests: f64,
    pub major_alignment_signal: f64,
    pub budget_compatibility: f64,
    pub intended_major: String,
    pub location_preference: Option<String>,
    pub budget: Option<f64>,
}

impl NormalizedStudent {
    /// SAT back on the 400-1600 scale. This is the exact inverse of
    /// `normalize_bounded(sat, 400, 1600)`, so the span is 1200, not 1600;
    /// an identical SAT must compare as a perfect match.
    pub fn sat_score(&self) -> Option<f64> {
        self.sat.map(|n| n * (SAT_MAX - SAT_MIN) + SAT_MIN)
    }

    /// GPA back on the 0-4.0 scale
    pub fn gpa_score(&self) -> Option<f64> {
        self.gpa.map(|n| n * GPA_MAX)
    }
}

/// Second phase: normalize one student against precomputed batch statistics
pub fn normalize_student(
    student: &StudentProfile,
    colleges: &[CollegeCandidate],
    stats: Option<PopulationStats>,
) -> NormalizedStudent {
    let sat = (student.sat_score > 0.0).then(|| normalize_bounded(student.sat_score, SAT_MIN, SAT_MAX));
    let gpa = (student.cgpa > 0.0).then(|| normalize_bounded(student.cgpa, 0.0, GPA_MAX));

    NormalizedStudent {
        sat,
        gpa,
        subject_grades: student.subject_grades.clamp(0.0, 1.0),
        extracurriculars: extracurricular_feature(student.extracurriculars.len(), stats),
        awards: count_feature(student.awards_count, AWARDS_MAX),
        standardized_tests: count_feature(student.standardized_tests_count, TESTS_MAX),
        major_alignment_signal: major_alignment_signal(&student.intended_major, colleges),
        budget_compatibility: budget_compatibility(student),
        intended_major: student.intended_major.trim().to_string(),
        location_preference: student
            .location_preference
            .as_ref()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
        budget: (student.budget > 0.0).then_some(student.budget),
    }
}

fn extracurricular_feature(activity_count: usize, stats: Option<PopulationStats>) -> f64 {
    match stats {
        Some(stats) => {
            let z = normalize_z_score(activity_count as f64, stats.mean, stats.std_dev);
            normalize_bounded(z, -Z_SCORE_RANGE, Z_SCORE_RANGE)
        }
        None => NEUTRAL,
    }
}

fn count_feature(count: u32, max: f64) -> f64 {
    if count == 0 {
        NEUTRAL
    } else {
        normalize_bounded(count as f64, 0.0, max)
    }
}

/// Batch-level signal: does any supplied college offer the intended major?
pub fn major_alignment_signal(intended_major: &str, colleges: &[CollegeCandidate]) -> f64 {
    let major = intended_major.trim().to_lowercase();
    if major.is_empty() {
        return NEUTRAL;
    }
    let offered = colleges
        .iter()
        .flat_map(|c| c.majors.iter())
        .any(|m| m.to_lowercase().contains(&major));
    if offered {
        1.0
    } else {
        NEUTRAL
    }
}

fn budget_compatibility(student: &StudentProfile) -> f64 {
    if student.budget <= 0.0 {
        return NEUTRAL;
    }
    normalize_bounded(student.budget, student.min_budget, student.max_budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn college_with_ecs(avg: Option<f64>) -> CollegeCandidate {
        CollegeCandidate {
            avg_extracurriculars: avg,
            ..CollegeCandidate::named("c")
        }
    }

    #[test]
    fn test_bounded_clamps_and_guards() {
        assert_eq!(normalize_bounded(1000.0, 400.0, 1600.0), 0.5);
        assert_eq!(normalize_bounded(200.0, 400.0, 1600.0), 0.0);
        assert_eq!(normalize_bounded(2000.0, 400.0, 1600.0), 1.0);
        assert_eq!(normalize_bounded(5.0, 3.0, 3.0), NEUTRAL);
    }

    #[test]
    fn test_z_score_zero_spread() {
        assert_eq!(normalize_z_score(7.0, 5.0, 0.0), 0.0);
        assert_eq!(normalize_z_score(7.0, 5.0, 2.0), 1.0);
    }

    #[test]
    fn test_population_defaults_missing_to_five() {
        let colleges = vec![college_with_ecs(None), college_with_ecs(Some(7.0))];
        let stats = compute_population_stats(&colleges).unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 6.0).abs() < 1e-9);
        assert!((stats.std_dev - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_empty_falls_back_to_neutral() {
        assert!(compute_population_stats(&[]).is_none());
        let colleges = vec![college_with_ecs(Some(0.0))];
        assert!(compute_population_stats(&colleges).is_none());

        let student = StudentProfile {
            extracurriculars: vec!["chess".to_string()],
            ..Default::default()
        };
        let normalized = normalize_student(&student, &[], None);
        assert_eq!(normalized.extracurriculars, NEUTRAL);
    }

    #[test]
    fn test_extracurriculars_depend_on_batch() {
        let student = StudentProfile {
            extracurriculars: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into(), "f".into()],
            ..Default::default()
        };
        let weak_batch = vec![college_with_ecs(Some(2.0)), college_with_ecs(Some(4.0))];
        let strong_batch = vec![college_with_ecs(Some(8.0)), college_with_ecs(Some(10.0))];

        let vs_weak = normalize_student(&student, &weak_batch, compute_population_stats(&weak_batch));
        let vs_strong = normalize_student(&student, &strong_batch, compute_population_stats(&strong_batch));

        // 6 activities vs mean 3, sd 1 => z=3, clamped to the top of [-2,2]
        assert_eq!(vs_weak.extracurriculars, 1.0);
        // 6 activities vs mean 9, sd 1 => z=-3, clamped to the bottom
        assert_eq!(vs_strong.extracurriculars, 0.0);
    }

    #[test]
    fn test_count_features_default_neutral() {
        let student = StudentProfile::default();
        let normalized = normalize_student(&student, &[], None);
        assert_eq!(normalized.awards, NEUTRAL);
        assert_eq!(normalized.standardized_tests, NEUTRAL);
        assert_eq!(normalized.budget_compatibility, NEUTRAL);
        assert!(normalized.sat.is_none());

        let student = StudentProfile {
            awards_count: 5,
            standardized_tests_count: 5,
            ..Default::default()
        };
        let normalized = normalize_student(&student, &[], None);
        assert_eq!(normalized.awards, 0.5);
        assert_eq!(normalized.standardized_tests, 1.0);
    }

    #[test]
    fn test_major_alignment_signal() {
        let colleges = vec![CollegeCandidate {
            majors: vec!["Computer Science and Engineering".to_string()],
            ..CollegeCandidate::named("Tech")
        }];
        assert_eq!(major_alignment_signal("computer science", &colleges), 1.0);
        assert_eq!(major_alignment_signal("Music", &colleges), NEUTRAL);
        assert_eq!(major_alignment_signal("  ", &colleges), NEUTRAL);
    }

    #[test]
    fn test_denormalization_round_trips() {
        let student = StudentProfile {
            sat_score: 1500.0,
            cgpa: 3.9,
            ..Default::default()
        };
        let normalized = normalize_student(&student, &[], None);
        assert!((normalized.sat_score().unwrap() - 1500.0).abs() < 1e-9);
        assert!((normalized.gpa_score().unwrap() - 3.9).abs() < 1e-9);
    }

    #[test]
    fn test_sat_denormalization_spans_bounded_range() {
        let at = |sat: Option<f64>| NormalizedStudent {
            sat,
            ..normalize_student(&StudentProfile::default(), &[], None)
        };
        assert_eq!(at(Some(0.0)).sat_score(), Some(SAT_MIN));
        assert_eq!(at(Some(0.5)).sat_score(), Some(1000.0));
        assert_eq!(at(Some(1.0)).sat_score(), Some(SAT_MAX));
        assert_eq!(at(None).sat_score(), None);
    }
}

//! Scoring functions for (student, college) pairs

use crate::normalizer::{NormalizedStudent, NEUTRAL};
use crate::types::*;
use crate::weights::{FactorWeights, WeightVector};

const SAT_TOLERANCE: f64 = 400.0;
const GPA_TOLERANCE: f64 = 1.0;
const MAJOR_MISS: f64 = 0.3;
const BUDGET_STRETCH: f64 = 0.5; // tuition may exceed budget by up to 50% before fit hits 0

/// Category sub-scores in [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScores {
    pub academic: f64,
    pub profile: f64,
    pub fit: f64,
}

impl CategoryScores {
    pub fn breakdown(&self) -> Breakdown {
        Breakdown {
            academic: to_percent(self.academic),
            profile: to_percent(self.profile),
            fit: to_percent(self.fit),
        }
    }
}

pub fn to_percent(x: f64) -> u8 {
    (x * 100.0).round().clamp(0.0, 100.0) as u8
}

fn closeness(student: Option<f64>, college: Option<f64>, tolerance: f64) -> f64 {
    match (student, college) {
        (Some(s), Some(c)) => (1.0 - (s - c).abs() / tolerance).max(0.0),
        _ => NEUTRAL,
    }
}

pub fn sat_match(student: &NormalizedStudent, college: &CollegeCandidate) -> f64 {
    closeness(student.sat_score(), college.avg_sat, SAT_TOLERANCE)
}

pub fn gpa_match(student: &NormalizedStudent, college: &CollegeCandidate) -> f64 {
    closeness(student.gpa_score(), college.avg_gpa, GPA_TOLERANCE)
}

/// Graded per-college signal, distinct from the batch-level major alignment
pub fn per_college_major_fit(intended_major: &str, college: &CollegeCandidate) -> f64 {
    let major = intended_major.trim().to_lowercase();
    if major.is_empty() {
        return NEUTRAL;
    }
    if college.majors.iter().any(|m| m.to_lowercase().contains(&major)) {
        1.0
    } else {
        MAJOR_MISS
    }
}

pub fn location_match(preference: Option<&str>, college: &CollegeCandidate) -> f64 {
    match (preference, college.state.as_deref()) {
        (Some(pref), Some(state)) if pref.trim().eq_ignore_ascii_case(state.trim()) => 1.0,
        _ => NEUTRAL,
    }
}

pub fn budget_fit(tuition: Option<f64>, budget: Option<f64>) -> f64 {
    match (tuition, budget) {
        (Some(tuition), Some(budget)) if budget > 0.0 => {
            if tuition <= budget {
                1.0
            } else {
                (1.0 - (tuition - budget) / (budget * BUDGET_STRETCH)).max(0.0)
            }
        }
        _ => NEUTRAL,
    }
}

fn dot(values: [f64; 3], weights: [f64; 3]) -> f64 {
    values.iter().zip(weights.iter()).map(|(v, w)| v * w).sum()
}

pub fn academic_values(student: &NormalizedStudent, college: &CollegeCandidate) -> [f64; 3] {
    [sat_match(student, college), gpa_match(student, college), student.subject_grades]
}

pub fn profile_values(student: &NormalizedStudent) -> [f64; 3] {
    [student.extracurriculars, student.awards, student.standardized_tests]
}

pub fn fit_values(student: &NormalizedStudent, college: &CollegeCandidate) -> [f64; 3] {
    [
        per_college_major_fit(&student.intended_major, college),
        location_match(student.location_preference.as_deref(), college),
        budget_fit(college.tuition, student.budget),
    ]
}

/// Weighted dot product of each category's match values with its factor weights
pub fn category_scores(
    student: &NormalizedStudent,
    college: &CollegeCandidate,
    weights: &FactorWeights,
) -> CategoryScores {
    CategoryScores {
        academic: dot(academic_values(student, college), weights.academic.as_array()),
        profile: dot(profile_values(student), weights.profile.as_array()),
        fit: dot(fit_values(student, college), weights.fit.as_array()),
    }
}

/// Combine category scores into a 0-100 match percentage
pub fn weighted_total(scores: &CategoryScores, weights: &WeightVector) -> u8 {
    let c = weights.categories();
    to_percent(c.academic * scores.academic + c.profile * scores.profile + c.fit * scores.fit)
}

/// Student side of the cosine comparison
pub fn student_vector(student: &NormalizedStudent) -> [f64; 9] {
    [
        student.sat.unwrap_or(NEUTRAL),
        student.gpa.unwrap_or(NEUTRAL),
        student.subject_grades,
        student.extracurriculars,
        student.awards,
        student.standardized_tests,
        student.major_alignment_signal,
        if student.location_preference.is_some() { 1.0 } else { NEUTRAL },
        student.budget_compatibility,
    ]
}

/// College side of the cosine comparison: per-college match values plus the student's profile features
pub fn college_vector(student: &NormalizedStudent, college: &CollegeCandidate) -> [f64; 9] {
    let [sat, gpa, subject] = academic_values(student, college);
    let [ecs, awards, tests] = profile_values(student);
    let [major, location, budget] = fit_values(student, college);
    [sat, gpa, subject, ecs, awards, tests, major, location, budget]
}

/// Cosine similarity; 0 when either vector has zero magnitude
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

/// Score one college with the requested strategy
pub fn score_college(
    student: &NormalizedStudent,
    college: &CollegeCandidate,
    weights: &WeightVector,
    strategy: Strategy,
) -> ScoredCollege {
    let scores = category_scores(student, college, &weights.factors());
    let score = match strategy {
        Strategy::Weighted => weighted_total(&scores, weights),
        Strategy::Cosine => to_percent(cosine_similarity(
            &student_vector(student),
            &college_vector(student, college),
        )),
    };

    tracing::debug!(
        "Scored '{}': {} (academic={:.3}, profile={:.3}, fit={:.3}, strategy={:?})",
        college.name,
        score,
        scores.academic,
        scores.profile,
        scores.fit,
        strategy
    );

    ScoredCollege {
        college: college.clone(),
        score,
        breakdown: scores.breakdown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{compute_population_stats, normalize_student};

    fn normalized(student: &StudentProfile, colleges: &[CollegeCandidate]) -> NormalizedStudent {
        normalize_student(student, colleges, compute_population_stats(colleges))
    }

    #[test]
    fn test_sat_match_is_unimodal() {
        let college = CollegeCandidate {
            avg_sat: Some(1300.0),
            ..CollegeCandidate::named("U")
        };
        let matches: Vec<f64> = (0..=12)
            .map(|i| {
                let student = StudentProfile {
                    sat_score: 1000.0 + 50.0 * i as f64,
                    ..Default::default()
                };
                sat_match(&normalized(&student, &[]), &college)
            })
            .collect();

        // peak at 1300 (index 6)
        let peak = 6;
        assert!((matches[peak] - 1.0).abs() < 1e-9);
        for i in 0..peak {
            assert!(matches[i] < matches[i + 1], "rising at {i}: {matches:?}");
        }
        for i in peak..matches.len() - 1 {
            assert!(matches[i] > matches[i + 1], "falling at {i}: {matches:?}");
        }
    }

    #[test]
    fn test_sat_match_floor_and_missing() {
        let student = StudentProfile {
            sat_score: 1600.0,
            ..Default::default()
        };
        let n = normalized(&student, &[]);
        let far = CollegeCandidate {
            avg_sat: Some(1000.0),
            ..CollegeCandidate::named("far")
        };
        assert_eq!(sat_match(&n, &far), 0.0);
        assert_eq!(sat_match(&n, &CollegeCandidate::named("unknown")), NEUTRAL);
    }

    #[test]
    fn test_budget_cliff() {
        let budget = Some(40000.0);
        assert_eq!(budget_fit(Some(10000.0), budget), 1.0);
        assert_eq!(budget_fit(Some(40000.0), budget), 1.0);

        let mut last = 1.0;
        for tuition in [41000.0, 45000.0, 50000.0, 55000.0, 59000.0] {
            let fit = budget_fit(Some(tuition), budget);
            assert!(fit < last, "tuition {tuition}");
            assert!(fit > 0.0);
            last = fit;
        }

        assert_eq!(budget_fit(Some(60000.0), budget), 0.0);
        assert_eq!(budget_fit(Some(90000.0), budget), 0.0);
        assert_eq!(budget_fit(None, budget), NEUTRAL);
        assert_eq!(budget_fit(Some(10000.0), None), NEUTRAL);
    }

    #[test]
    fn test_major_and_location_fit() {
        let college = CollegeCandidate {
            majors: vec!["Applied Mathematics".to_string()],
            state: Some("California".to_string()),
            ..CollegeCandidate::named("U")
        };
        assert_eq!(per_college_major_fit("mathematics", &college), 1.0);
        assert_eq!(per_college_major_fit("Physics", &college), MAJOR_MISS);
        assert_eq!(per_college_major_fit("", &college), NEUTRAL);
        assert_eq!(location_match(Some("california"), &college), 1.0);
        assert_eq!(location_match(Some("Texas"), &college), NEUTRAL);
        assert_eq!(location_match(None, &college), NEUTRAL);
    }

    #[test]
    fn test_cosine_similarity_guards() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_defaults() {
        let student = StudentProfile {
            subject_grades: 0.5,
            ..Default::default()
        };
        let college = CollegeCandidate::named("Blank");
        let n = normalize_student(&student, &[], None);
        let scored = score_college(&n, &college, &WeightVector::default(), Strategy::Weighted);

        assert_eq!(scored.breakdown.academic, 50);
        assert_eq!(scored.breakdown.profile, 50);
        assert_eq!(scored.breakdown.fit, 50);
        assert_eq!(scored.score, 50);
    }

    #[test]
    fn test_cosine_vectors_are_asymmetric() {
        let student = StudentProfile {
            sat_score: 1000.0,
            cgpa: 2.0,
            subject_grades: 0.75,
            extracurriculars: (0..8).map(|i| format!("activity {i}")).collect(),
            awards_count: 5,
            standardized_tests_count: 1,
            intended_major: "History".to_string(),
            location_preference: Some("Ohio".to_string()),
            budget: 20000.0,
            min_budget: 10000.0,
            max_budget: 30000.0,
        };
        let target = CollegeCandidate {
            avg_sat: Some(1000.0),
            avg_gpa: Some(3.0),
            avg_extracurriculars: Some(4.0),
            majors: vec!["Art".to_string()],
            state: Some("Texas".to_string()),
            tuition: Some(30000.0),
            ..CollegeCandidate::named("Target")
        };
        // a batch peer offering the major lifts the batch-level signal only
        let peer = CollegeCandidate {
            avg_extracurriculars: Some(8.0),
            majors: vec!["History".to_string()],
            ..CollegeCandidate::named("Peer")
        };
        let n = normalized(&student, &[target.clone(), peer]);

        let expected_student = [0.5, 0.5, 0.75, 0.75, 0.5, 0.2, 1.0, 1.0, 0.5];
        let expected_college = [1.0, 0.0, 0.75, 0.75, 0.5, 0.2, MAJOR_MISS, NEUTRAL, 0.0];
        let student_vec = student_vector(&n);
        let college_vec = college_vector(&n, &target);
        for i in 0..9 {
            assert!((student_vec[i] - expected_student[i]).abs() < 1e-9, "student[{i}]: {student_vec:?}");
            assert!((college_vec[i] - expected_college[i]).abs() < 1e-9, "college[{i}]: {college_vec:?}");
        }

        // 2.715 / sqrt(4.165 * 2.755) ~ 0.8015
        let sim = cosine_similarity(&student_vec, &college_vec);
        assert!((sim - 2.715 / (4.165f64 * 2.755).sqrt()).abs() < 1e-9);
        let scored = score_college(&n, &target, &WeightVector::default(), Strategy::Cosine);
        assert_eq!(scored.score, 80);
    }

    #[test]
    fn test_cosine_strategy_in_bounds() {
        let student = StudentProfile {
            sat_score: 1350.0,
            cgpa: 3.5,
            intended_major: "Economics".to_string(),
            budget: 30000.0,
            ..Default::default()
        };
        let college = CollegeCandidate {
            avg_sat: Some(1400.0),
            avg_gpa: Some(3.7),
            majors: vec!["Economics".to_string()],
            tuition: Some(28000.0),
            ..CollegeCandidate::named("Econ U")
        };
        let n = normalized(&student, std::slice::from_ref(&college));
        let scored = score_college(&n, &college, &WeightVector::default(), Strategy::Cosine);
        assert!(scored.score <= 100);
        assert!(scored.score > 50);
    }
}

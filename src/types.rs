//! Core type definitions for college matching

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Placeholder subject-grade signal used when the caller has none
pub const DEFAULT_SUBJECT_GRADES: f64 = 0.7;

/// Default number of colleges returned by a ranking call
pub const DEFAULT_TOP_N: usize = 4;

/// Academic profile of one student, constructed per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub sat_score: f64,             // 0 when absent
    #[serde(default)]
    pub cgpa: f64,                  // 0-4.0 scale
    #[serde(default = "default_subject_grades")]
    pub subject_grades: f64,
    #[serde(default)]
    pub extracurriculars: Vec<String>,
    #[serde(default)]
    pub awards_count: u32,
    #[serde(default)]
    pub standardized_tests_count: u32,
    #[serde(default)]
    pub intended_major: String,
    #[serde(default)]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub budget: f64,                // 0 when unset
    #[serde(default)]
    pub min_budget: f64,
    #[serde(default)]
    pub max_budget: f64,
}

fn default_subject_grades() -> f64 {
    DEFAULT_SUBJECT_GRADES
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            sat_score: 0.0,
            cgpa: 0.0,
            subject_grades: DEFAULT_SUBJECT_GRADES,
            extracurriculars: vec![],
            awards_count: 0,
            standardized_tests_count: 0,
            intended_major: String::new(),
            location_preference: None,
            budget: 0.0,
            min_budget: 0.0,
            max_budget: 0.0,
        }
    }
}

impl StudentProfile {
    /// Reject values outside the ranges the normalizer assumes
    pub fn validate(&self) -> Result<(), MatchError> {
        let numeric = [
            ("satScore", self.sat_score),
            ("cgpa", self.cgpa),
            ("subjectGrades", self.subject_grades),
            ("budget", self.budget),
            ("minBudget", self.min_budget),
            ("maxBudget", self.max_budget),
        ];
        for (field, value) in numeric {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::InvalidProfile(format!(
                    "{} must be a non-negative number, got {}",
                    field, value
                )));
            }
        }
        if self.sat_score > 1600.0 {
            return Err(MatchError::InvalidProfile(format!(
                "satScore must be at most 1600, got {}",
                self.sat_score
            )));
        }
        if self.cgpa > 4.0 {
            return Err(MatchError::InvalidProfile(format!(
                "cgpa must be on a 0-4.0 scale, got {}",
                self.cgpa
            )));
        }
        Ok(())
    }

    /// Rescale a CGPA reported on another scale (10-point, percentage) to 0-4.0
    pub fn with_gpa_scale(mut self, scale: f64) -> Self {
        if scale > 0.0 && (scale - 4.0).abs() > f64::EPSILON {
            self.cgpa = self.cgpa / scale * 4.0;
        }
        self
    }
}

/// One target school supplied for scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeCandidate {
    pub name: String,
    #[serde(default)]
    pub avg_sat: Option<f64>,
    #[serde(default)]
    pub avg_gpa: Option<f64>,
    #[serde(default)]
    pub avg_extracurriculars: Option<f64>,
    #[serde(default)]
    pub majors: Vec<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tuition: Option<f64>,
}

impl CollegeCandidate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when any field a source could fill is still absent
    pub fn has_missing_data(&self) -> bool {
        self.avg_sat.is_none()
            || self.avg_gpa.is_none()
            || self.avg_extracurriculars.is_none()
            || self.majors.is_empty()
            || self.state.is_none()
            || self.city.is_none()
            || self.tuition.is_none()
    }

    /// Fill absent fields from `other`, never overwriting known values
    pub fn merge_missing(&mut self, other: &CollegeCandidate) {
        if self.avg_sat.is_none() {
            self.avg_sat = other.avg_sat;
        }
        if self.avg_gpa.is_none() {
            self.avg_gpa = other.avg_gpa;
        }
        if self.avg_extracurriculars.is_none() {
            self.avg_extracurriculars = other.avg_extracurriculars;
        }
        if self.majors.is_empty() {
            self.majors = other.majors.clone();
        }
        if self.state.is_none() {
            self.state = other.state.clone();
        }
        if self.city.is_none() {
            self.city = other.city.clone();
        }
        if self.tuition.is_none() {
            self.tuition = other.tuition;
        }
    }
}

/// Per-category sub-scores, each an integer percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub academic: u8,
    pub profile: u8,
    pub fit: u8,
}

/// Scoring result for one college
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCollege {
    pub college: CollegeCandidate,
    pub score: u8,
    pub breakdown: Breakdown,
}

/// Which scorer produces the headline score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Weighted,
    Cosine,
}

/// Caller-selectable scoring options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankOptions {
    /// Named factor preset (academic_focused, holistic, ...); defaults apply when absent
    #[serde(default)]
    pub preset: Option<String>,
    /// Named category preset (academic_heavy, balanced, ...)
    #[serde(default)]
    pub category_preset: Option<String>,
    #[serde(default)]
    pub weights: Option<crate::weights::PartialFactorWeights>,
    #[serde(default)]
    pub category_weights: Option<crate::weights::PartialCategoryWeights>,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub strategy: Strategy,
}

/// Request to match a student against a set of colleges
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub student: StudentProfile,
    #[serde(default)]
    pub colleges: Vec<CollegeCandidate>,
    #[serde(default)]
    pub options: RankOptions,
}

/// Response from a match call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub results: Vec<ScoredCollege>,
    pub strategy: Strategy,
    pub stats: MatchStats,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub colleges_received: usize,
    pub colleges_scored: usize,
    pub colleges_enriched: usize,
    pub source_failures: usize,
    pub elapsed_ms: u64,
}

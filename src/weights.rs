//! Three-category, nine-factor weight configuration
//!
//! Factor weights are renormalized to sum to 1 within each category, and the
//! category weights to sum to 1 overall. A `WeightVector` is an immutable
//! snapshot: overrides produce a new value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("weight '{0}' must be a finite non-negative number, got {1}")]
    Invalid(&'static str, f64),
    #[error("unknown weight preset '{0}'")]
    UnknownPreset(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicWeights {
    pub sat: f64,
    pub gpa: f64,
    pub subject_grades: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileWeights {
    pub extracurriculars: f64,
    pub awards: f64,
    pub standardized_tests: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitWeights {
    pub major: f64,
    pub location: f64,
    pub budget: f64,
}

impl AcademicWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.sat, self.gpa, self.subject_grades]
    }
}

impl ProfileWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.extracurriculars, self.awards, self.standardized_tests]
    }
}

impl FitWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.major, self.location, self.budget]
    }
}

/// Nested factor weights for all three categories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub academic: AcademicWeights,
    pub profile: ProfileWeights,
    pub fit: FitWeights,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            academic: AcademicWeights { sat: 0.40, gpa: 0.40, subject_grades: 0.20 },
            profile: ProfileWeights { extracurriculars: 0.50, awards: 0.30, standardized_tests: 0.20 },
            fit: FitWeights { major: 0.50, location: 0.20, budget: 0.30 },
        }
    }
}

pub const ACADEMIC_FOCUSED: FactorWeights = FactorWeights {
    academic: AcademicWeights { sat: 0.45, gpa: 0.45, subject_grades: 0.10 },
    profile: ProfileWeights { extracurriculars: 0.40, awards: 0.40, standardized_tests: 0.20 },
    fit: FitWeights { major: 0.60, location: 0.20, budget: 0.20 },
};

pub const HOLISTIC: FactorWeights = FactorWeights {
    academic: AcademicWeights { sat: 0.40, gpa: 0.40, subject_grades: 0.20 },
    profile: ProfileWeights { extracurriculars: 0.40, awards: 0.30, standardized_tests: 0.30 },
    fit: FitWeights { major: 0.50, location: 0.20, budget: 0.30 },
};

pub const PROFILE_FOCUSED: FactorWeights = FactorWeights {
    academic: AcademicWeights { sat: 0.30, gpa: 0.40, subject_grades: 0.30 },
    profile: ProfileWeights { extracurriculars: 0.50, awards: 0.35, standardized_tests: 0.15 },
    fit: FitWeights { major: 0.40, location: 0.30, budget: 0.30 },
};

pub const FIT_FOCUSED: FactorWeights = FactorWeights {
    academic: AcademicWeights { sat: 0.35, gpa: 0.35, subject_grades: 0.30 },
    profile: ProfileWeights { extracurriculars: 0.40, awards: 0.30, standardized_tests: 0.30 },
    fit: FitWeights { major: 0.40, location: 0.25, budget: 0.35 },
};

/// Contribution of each category to the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub academic: f64,
    pub profile: f64,
    pub fit: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        ACADEMIC_HEAVY
    }
}

pub const ACADEMIC_HEAVY: CategoryWeights = CategoryWeights { academic: 0.60, profile: 0.25, fit: 0.15 };
pub const BALANCED: CategoryWeights = CategoryWeights { academic: 0.40, profile: 0.30, fit: 0.30 };
pub const PROFILE_HEAVY: CategoryWeights = CategoryWeights { academic: 0.30, profile: 0.50, fit: 0.20 };
pub const FIT_HEAVY: CategoryWeights = CategoryWeights { academic: 0.30, profile: 0.20, fit: 0.50 };

pub const FACTOR_PRESETS: [(&str, FactorWeights); 4] = [
    ("academic_focused", ACADEMIC_FOCUSED),
    ("holistic", HOLISTIC),
    ("profile_focused", PROFILE_FOCUSED),
    ("fit_focused", FIT_FOCUSED),
];

pub const CATEGORY_PRESETS: [(&str, CategoryWeights); 4] = [
    ("academic_heavy", ACADEMIC_HEAVY),
    ("balanced", BALANCED),
    ("profile_heavy", PROFILE_HEAVY),
    ("fit_heavy", FIT_HEAVY),
];

fn preset_key(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

pub fn factor_preset(name: &str) -> Result<FactorWeights, WeightError> {
    let key = preset_key(name);
    FACTOR_PRESETS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, w)| *w)
        .ok_or_else(|| WeightError::UnknownPreset(name.to_string()))
}

pub fn category_preset(name: &str) -> Result<CategoryWeights, WeightError> {
    let key = preset_key(name);
    CATEGORY_PRESETS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, w)| *w)
        .ok_or_else(|| WeightError::UnknownPreset(name.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAcademicWeights {
    pub sat: Option<f64>,
    pub gpa: Option<f64>,
    pub subject_grades: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialProfileWeights {
    pub extracurriculars: Option<f64>,
    pub awards: Option<f64>,
    pub standardized_tests: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialFitWeights {
    pub major: Option<f64>,
    pub location: Option<f64>,
    pub budget: Option<f64>,
}

/// Caller overrides; any subset of factors in any category
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartialFactorWeights {
    #[serde(default)]
    pub academic: Option<PartialAcademicWeights>,
    #[serde(default)]
    pub profile: Option<PartialProfileWeights>,
    #[serde(default)]
    pub fit: Option<PartialFitWeights>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartialCategoryWeights {
    pub academic: Option<f64>,
    pub profile: Option<f64>,
    pub fit: Option<f64>,
}

fn checked(name: &'static str, value: Option<f64>, base: f64) -> Result<f64, WeightError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(WeightError::Invalid(name, v)),
        Some(v) => Ok(v),
        None => Ok(base),
    }
}

/// Divide each weight by the group sum; leave untouched when the sum is 0
fn normalize_triple(values: [f64; 3]) -> [f64; 3] {
    let sum: f64 = values.iter().sum();
    if sum == 0.0 {
        return values;
    }
    values.map(|v| v / sum)
}

impl FactorWeights {
    pub fn merged(&self, partial: &PartialFactorWeights) -> Result<Self, WeightError> {
        let mut merged = *self;
        if let Some(a) = &partial.academic {
            merged.academic = AcademicWeights {
                sat: checked("academic.sat", a.sat, self.academic.sat)?,
                gpa: checked("academic.gpa", a.gpa, self.academic.gpa)?,
                subject_grades: checked("academic.subjectGrades", a.subject_grades, self.academic.subject_grades)?,
            };
        }
        if let Some(p) = &partial.profile {
            merged.profile = ProfileWeights {
                extracurriculars: checked("profile.extracurriculars", p.extracurriculars, self.profile.extracurriculars)?,
                awards: checked("profile.awards", p.awards, self.profile.awards)?,
                standardized_tests: checked(
                    "profile.standardizedTests",
                    p.standardized_tests,
                    self.profile.standardized_tests,
                )?,
            };
        }
        if let Some(f) = &partial.fit {
            merged.fit = FitWeights {
                major: checked("fit.major", f.major, self.fit.major)?,
                location: checked("fit.location", f.location, self.fit.location)?,
                budget: checked("fit.budget", f.budget, self.fit.budget)?,
            };
        }
        Ok(merged)
    }

    pub fn normalized(&self) -> Self {
        let [sat, gpa, subject_grades] = normalize_triple(self.academic.as_array());
        let [extracurriculars, awards, standardized_tests] = normalize_triple(self.profile.as_array());
        let [major, location, budget] = normalize_triple(self.fit.as_array());
        Self {
            academic: AcademicWeights { sat, gpa, subject_grades },
            profile: ProfileWeights { extracurriculars, awards, standardized_tests },
            fit: FitWeights { major, location, budget },
        }
    }
}

impl CategoryWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.academic, self.profile, self.fit]
    }

    pub fn merged(&self, partial: &PartialCategoryWeights) -> Result<Self, WeightError> {
        Ok(Self {
            academic: checked("academic", partial.academic, self.academic)?,
            profile: checked("profile", partial.profile, self.profile)?,
            fit: checked("fit", partial.fit, self.fit)?,
        })
    }

    pub fn normalized(&self) -> Self {
        let [academic, profile, fit] = normalize_triple(self.as_array());
        Self { academic, profile, fit }
    }
}

/// Immutable, normalized weight snapshot used for one scoring session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector {
    factors: FactorWeights,
    categories: CategoryWeights,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            factors: FactorWeights::default().normalized(),
            categories: CategoryWeights::default().normalized(),
        }
    }
}

impl WeightVector {
    /// Merge optional overrides into the base tables, then renormalize
    pub fn new(
        factors: FactorWeights,
        categories: CategoryWeights,
        factor_overrides: Option<&PartialFactorWeights>,
        category_overrides: Option<&PartialCategoryWeights>,
    ) -> Result<Self, WeightError> {
        let factors = match factor_overrides {
            Some(partial) => factors.merged(partial)?,
            None => factors,
        };
        let categories = match category_overrides {
            Some(partial) => categories.merged(partial)?,
            None => categories,
        };
        Ok(Self {
            factors: factors.normalized(),
            categories: categories.normalized(),
        })
    }

    pub fn factors(&self) -> FactorWeights {
        self.factors
    }

    pub fn categories(&self) -> CategoryWeights {
        self.categories
    }

    /// New snapshot with `partial` applied on top of this one
    pub fn with_overrides(
        &self,
        factor_overrides: Option<&PartialFactorWeights>,
        category_overrides: Option<&PartialCategoryWeights>,
    ) -> Result<Self, WeightError> {
        Self::new(self.factors, self.categories, factor_overrides, category_overrides)
    }
}

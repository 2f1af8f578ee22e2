//! # Domain Records
//!
//! Typed records produced by the data access layer, plus the filter values
//! accepted by the experiment listing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An animal enrolled in experiments, joined with its species name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub subject_id: i64,
    pub subject_name: String,
    pub species_name: String,
    pub date_of_birth: NaiveDate,
}

/// A scored trial, joined with its subject's species and its type.
///
/// `score` is already normalized against the type's `max_score` and rendered
/// as a percentage string such as `"90.0%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub experiment_id: i64,
    pub subject_id: i64,
    pub experiment_date: NaiveDate,
    pub species: String,
    pub experiment_type: String,
    pub score: String,
}

/// The experiment types a listing may be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentType {
    Intelligence,
    Obedience,
    Aggression,
}

impl ExperimentType {
    /// All accepted types, in declaration order.
    pub const ALL: [ExperimentType; 3] = [
        ExperimentType::Intelligence,
        ExperimentType::Obedience,
        ExperimentType::Aggression,
    ];

    /// Get the type name as stored in `experiment_type.type_name`
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentType::Intelligence => "intelligence",
            ExperimentType::Obedience => "obedience",
            ExperimentType::Aggression => "aggression",
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known experiment type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExperimentType(pub String);

impl FromStr for ExperimentType {
    type Err = UnknownExperimentType;

    /// Matching is exact: query values must be lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExperimentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownExperimentType(s.to_string()))
    }
}

/// Optional narrowing applied to an experiment listing.
///
/// Both fields are independent; an empty filter lists everything.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExperimentFilter {
    /// Keep only experiments of this type (case-insensitive match).
    pub experiment_type: Option<ExperimentType>,
    /// Keep only experiments whose percentage score is strictly greater.
    pub min_score: Option<u8>,
}

impl ExperimentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, experiment_type: ExperimentType) -> Self {
        self.experiment_type = Some(experiment_type);
        self
    }

    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.experiment_type.is_none() && self.min_score.is_none()
    }
}

/// Normalize a raw score against the type maximum, rounded to two places.
pub fn score_percentage(score: f64, max_score: f64) -> f64 {
    (score * 100.0 / max_score * 100.0).round() / 100.0
}

/// Render a percentage value as `"90.0%"` / `"93.33%"`.
///
/// Whole values keep a single decimal place.
pub fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value)
    }
}

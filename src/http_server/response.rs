//! # Response Formatting
//!
//! JSON bodies returned by the handlers. Dates leave the service as
//! `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Experiment, Subject};

/// Boundary date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date for a response body
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Fixed payload served at `/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeResponse {
    pub designation: String,
    pub resource: String,
    pub status: String,
}

impl Default for HomeResponse {
    fn default() -> Self {
        Self {
            designation: "Project Armada".to_string(),
            resource: "JSON-based API".to_string(),
            status: "Classified".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectResponse {
    pub subject_id: i64,
    pub subject_name: String,
    pub species_name: String,
    pub date_of_birth: String,
}

impl From<Subject> for SubjectResponse {
    fn from(subject: Subject) -> Self {
        Self {
            subject_id: subject.subject_id,
            subject_name: subject.subject_name,
            species_name: subject.species_name,
            date_of_birth: format_date(subject.date_of_birth),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentResponse {
    pub experiment_id: i64,
    pub subject_id: i64,
    pub experiment_date: String,
    pub species: String,
    pub experiment_type: String,
    pub score: String,
}

impl From<Experiment> for ExperimentResponse {
    fn from(experiment: Experiment) -> Self {
        Self {
            experiment_id: experiment.experiment_id,
            subject_id: experiment.subject_id,
            experiment_date: format_date(experiment.experiment_date),
            species: experiment.species,
            experiment_type: experiment.experiment_type,
            score: experiment.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format() {
        let date = NaiveDate::from_ymd_opt(2019, 7, 4).unwrap();
        assert_eq!(format_date(date), "2019-07-04");
    }

    #[test]
    fn test_subject_response_fields() {
        let subject = Subject {
            subject_id: 3,
            subject_name: "Marlowe".to_string(),
            species_name: "Beluga whale".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 1, 27).unwrap(),
        };

        let json = serde_json::to_value(SubjectResponse::from(subject)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subject_id": 3,
                "subject_name": "Marlowe",
                "species_name": "Beluga whale",
                "date_of_birth": "2015-01-27"
            })
        );
    }

    #[test]
    fn test_home_payload() {
        let json = serde_json::to_value(HomeResponse::default()).unwrap();
        assert_eq!(json["designation"], "Project Armada");
        assert_eq!(json["resource"], "JSON-based API");
        assert_eq!(json["status"], "Classified");
    }
}

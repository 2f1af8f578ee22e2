//! # Query Parameter Validation
//!
//! Turns raw query-string values into a typed [`ExperimentFilter`].

use std::collections::HashMap;

use crate::models::{ExperimentFilter, ExperimentType};

use super::errors::{ApiError, ApiResult};

/// Query key selecting an experiment type
pub const TYPE_PARAM: &str = "type";

/// Query key setting the exclusive lower score bound
pub const SCORE_OVER_PARAM: &str = "score_over";

/// Upper bound (exclusive) for `score_over`
pub const MAX_SCORE_OVER: i64 = 100;

/// Parse the `GET /experiment` query string.
///
/// `type` is checked before `score_over`; unknown keys are ignored.
pub fn parse_experiment_filter(params: &HashMap<String, String>) -> ApiResult<ExperimentFilter> {
    let mut filter = ExperimentFilter::new();

    if let Some(value) = params.get(TYPE_PARAM) {
        filter.experiment_type = Some(parse_type(value)?);
    }

    if let Some(value) = params.get(SCORE_OVER_PARAM) {
        filter.min_score = Some(parse_score_over(value)?);
    }

    Ok(filter)
}

/// Parse `type`: exact, lowercase match against the known types
fn parse_type(value: &str) -> ApiResult<ExperimentType> {
    value.parse().map_err(|_| ApiError::InvalidType)
}

/// Parse `score_over`: an integer in `[0, 100)`
fn parse_score_over(value: &str) -> ApiResult<u8> {
    let score: i64 = value
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidScoreOverType)?;

    if !(0..MAX_SCORE_OVER).contains(&score) {
        return Err(ApiError::InvalidScoreOver);
    }

    u8::try_from(score).map_err(|_| ApiError::InvalidScoreOver)
}

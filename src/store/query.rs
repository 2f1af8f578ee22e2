//! # Query Builder
//!
//! Translates listing filters into fixed SQL text plus bound parameters.
//! Filter values never appear in the SQL text itself.

use tokio_postgres::types::ToSql;

use crate::models::ExperimentFilter;

/// Normalized score, rounded to two decimal places.
const SCORE_PERCENTAGE: &str = "ROUND(e.score::NUMERIC * 100 / et.max_score, 2)";

const SUBJECT_SELECT: &str = "SELECT s.subject_id::BIGINT AS subject_id, s.subject_name, \
     sp.species_name, s.date_of_birth::DATE AS date_of_birth \
     FROM subject s \
     JOIN species sp ON sp.species_id = s.species_id";

const EXPERIMENT_FROM: &str = "FROM experiment e \
     JOIN subject s ON s.subject_id = e.subject_id \
     JOIN species sp ON sp.species_id = s.species_id \
     JOIN experiment_type et ON et.experiment_type_id = e.experiment_type_id";

/// A bound query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    BigInt(i64),
}

impl SqlParam {
    /// Borrow as a driver parameter
    pub fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            SqlParam::Text(v) => v,
            SqlParam::Int(v) => v,
            SqlParam::BigInt(v) => v,
        }
    }
}

/// SQL text with its positional parameters (`$1`, `$2`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl BuiltQuery {
    fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind a value and return its placeholder
    fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    /// Parameters in driver form
    pub fn driver_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(SqlParam::as_to_sql).collect()
    }
}

fn experiment_select() -> String {
    format!(
        "SELECT e.experiment_id::BIGINT AS experiment_id, e.subject_id::BIGINT AS subject_id, \
         e.experiment_date::DATE AS experiment_date, sp.species_name AS species, \
         et.type_name AS experiment_type, {}::FLOAT8 AS score {}",
        SCORE_PERCENTAGE, EXPERIMENT_FROM
    )
}

/// All subjects, newest first
pub fn list_subjects() -> BuiltQuery {
    BuiltQuery::new(format!("{} ORDER BY s.date_of_birth DESC", SUBJECT_SELECT))
}

/// Experiments narrowed by `filter`, most recent first
///
/// Each filter contributes its own clause, so either may be supplied alone.
pub fn list_experiments(filter: &ExperimentFilter) -> BuiltQuery {
    let mut query = BuiltQuery::new(experiment_select());
    let mut clauses = Vec::new();

    if let Some(experiment_type) = filter.experiment_type {
        let placeholder = query.bind(SqlParam::Text(experiment_type.to_string()));
        clauses.push(format!("et.type_name ILIKE {}::TEXT", placeholder));
    }

    if let Some(min_score) = filter.min_score {
        let placeholder = query.bind(SqlParam::Int(i32::from(min_score)));
        clauses.push(format!("{} > {}::INT4", SCORE_PERCENTAGE, placeholder));
    }

    if !clauses.is_empty() {
        query.sql.push_str(" WHERE ");
        query.sql.push_str(&clauses.join(" AND "));
    }
    query.sql.push_str(" ORDER BY e.experiment_date DESC");
    query
}

/// A single experiment by id
pub fn experiment_by_id(experiment_id: i64) -> BuiltQuery {
    let mut query = BuiltQuery::new(experiment_select());
    let placeholder = query.bind(SqlParam::BigInt(experiment_id));
    query
        .sql
        .push_str(&format!(" WHERE e.experiment_id = {}::BIGINT", placeholder));
    query
}

/// Remove a single experiment by id
pub fn delete_experiment(experiment_id: i64) -> BuiltQuery {
    let mut query = BuiltQuery::new("DELETE FROM experiment");
    let placeholder = query.bind(SqlParam::BigInt(experiment_id));
    query
        .sql
        .push_str(&format!(" WHERE experiment_id = {}::BIGINT", placeholder));
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperimentType;

    #[test]
    fn test_subjects_ordered_by_birth_desc() {
        let query = list_subjects();
        assert!(query.sql.ends_with("ORDER BY s.date_of_birth DESC"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_unfiltered_experiments() {
        let query = list_experiments(&ExperimentFilter::new());
        assert!(!query.sql.contains("WHERE"));
        assert!(query.sql.ends_with("ORDER BY e.experiment_date DESC"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_type_filter_alone() {
        let filter = ExperimentFilter::new().with_type(ExperimentType::Intelligence);
        let query = list_experiments(&filter);

        assert!(query.sql.contains("WHERE et.type_name ILIKE $1::TEXT ORDER BY"));
        assert_eq!(
            query.params,
            vec![SqlParam::Text("intelligence".to_string())]
        );
    }

    #[test]
    fn test_score_filter_alone() {
        let filter = ExperimentFilter::new().with_min_score(70);
        let query = list_experiments(&filter);

        assert!(query.sql.contains(&format!("WHERE {} > $1::INT4", SCORE_PERCENTAGE)));
        assert!(!query.sql.contains("ILIKE"));
        assert_eq!(query.params, vec![SqlParam::Int(70)]);
    }

    #[test]
    fn test_both_filters_numbered_in_order() {
        let filter = ExperimentFilter::new()
            .with_type(ExperimentType::Aggression)
            .with_min_score(10);
        let query = list_experiments(&filter);

        assert!(query.sql.contains("et.type_name ILIKE $1::TEXT AND"));
        assert!(query.sql.contains("> $2::INT4"));
        assert_eq!(query.params.len(), 2);
        assert_eq!(query.driver_params().len(), 2);
    }

    #[test]
    fn test_filter_values_are_not_inlined() {
        let filter = ExperimentFilter::new()
            .with_type(ExperimentType::Obedience)
            .with_min_score(55);
        let query = list_experiments(&filter);

        assert!(!query.sql.contains("obedience"));
        assert!(!query.sql.contains("55"));
    }

    #[test]
    fn test_lookup_and_delete_bind_id() {
        let lookup = experiment_by_id(42);
        assert!(lookup.sql.ends_with("WHERE e.experiment_id = $1::BIGINT"));
        assert_eq!(lookup.params, vec![SqlParam::BigInt(42)]);

        let delete = delete_experiment(42);
        assert_eq!(
            delete.sql,
            "DELETE FROM experiment WHERE experiment_id = $1::BIGINT"
        );
        assert_eq!(delete.params, vec![SqlParam::BigInt(42)]);
    }
}

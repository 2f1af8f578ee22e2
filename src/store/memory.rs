//! # In-Memory Store
//!
//! Holds the four tables in process and answers the same fixed queries as
//! [`PostgresStore`](super::PostgresStore): inner joins, newest-first
//! ordering, score normalization and the optional filters.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{format_percentage, score_percentage, Experiment, ExperimentFilter, Subject};

use super::errors::{StoreError, StoreResult};
use super::ExperimentStore;

/// Row of the `species` table
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRow {
    pub species_id: i64,
    pub species_name: String,
}

/// Row of the `subject` table
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRow {
    pub subject_id: i64,
    pub subject_name: String,
    pub species_id: i64,
    pub date_of_birth: NaiveDate,
}

/// Row of the `experiment_type` table
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentTypeRow {
    pub experiment_type_id: i64,
    pub type_name: String,
    pub max_score: f64,
}

/// Row of the `experiment` table
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRow {
    pub experiment_id: i64,
    pub subject_id: i64,
    pub experiment_type_id: i64,
    pub experiment_date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Default)]
struct Tables {
    species: Vec<SpeciesRow>,
    subjects: Vec<SubjectRow>,
    experiment_types: Vec<ExperimentTypeRow>,
    experiments: Vec<ExperimentRow>,
}

impl Tables {
    fn species_name(&self, species_id: i64) -> Option<&str> {
        self.species
            .iter()
            .find(|s| s.species_id == species_id)
            .map(|s| s.species_name.as_str())
    }

    fn subject(&self, subject_id: i64) -> Option<&SubjectRow> {
        self.subjects.iter().find(|s| s.subject_id == subject_id)
    }

    fn experiment_type(&self, experiment_type_id: i64) -> Option<&ExperimentTypeRow> {
        self.experiment_types
            .iter()
            .find(|t| t.experiment_type_id == experiment_type_id)
    }

    /// Join an experiment row; `None` if a reference is dangling.
    fn join_experiment(
        &self,
        row: &ExperimentRow,
    ) -> Option<(Experiment, &ExperimentTypeRow, f64)> {
        let subject = self.subject(row.subject_id)?;
        let species = self.species_name(subject.species_id)?;
        let experiment_type = self.experiment_type(row.experiment_type_id)?;
        let percentage = score_percentage(row.score, experiment_type.max_score);

        let experiment = Experiment {
            experiment_id: row.experiment_id,
            subject_id: row.subject_id,
            experiment_date: row.experiment_date,
            species: species.to_string(),
            experiment_type: experiment_type.type_name.clone(),
            score: format_percentage(percentage),
        };
        Some((experiment, experiment_type, percentage))
    }
}

/// In-process experiment store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a small demonstration dataset
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        store.seed_sample_data();
        store
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn with_tables<F>(&self, f: F)
    where
        F: FnOnce(&mut Tables),
    {
        // Inserts recover a poisoned lock.
        let mut tables = match self.tables.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut tables);
    }

    pub fn add_species(&self, species_id: i64, species_name: &str) -> &Self {
        self.with_tables(|t| {
            t.species.push(SpeciesRow {
                species_id,
                species_name: species_name.to_string(),
            })
        });
        self
    }

    pub fn add_subject(
        &self,
        subject_id: i64,
        subject_name: &str,
        species_id: i64,
        date_of_birth: NaiveDate,
    ) -> &Self {
        self.with_tables(|t| {
            t.subjects.push(SubjectRow {
                subject_id,
                subject_name: subject_name.to_string(),
                species_id,
                date_of_birth,
            })
        });
        self
    }

    pub fn add_experiment_type(
        &self,
        experiment_type_id: i64,
        type_name: &str,
        max_score: f64,
    ) -> &Self {
        self.with_tables(|t| {
            t.experiment_types.push(ExperimentTypeRow {
                experiment_type_id,
                type_name: type_name.to_string(),
                max_score,
            })
        });
        self
    }

    pub fn add_experiment(
        &self,
        experiment_id: i64,
        subject_id: i64,
        experiment_type_id: i64,
        experiment_date: NaiveDate,
        score: f64,
    ) -> &Self {
        self.with_tables(|t| {
            t.experiments.push(ExperimentRow {
                experiment_id,
                subject_id,
                experiment_type_id,
                experiment_date,
                score,
            })
        });
        self
    }

    /// Number of stored experiment rows, joined or not
    pub fn experiment_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.experiments.len())
    }

    fn seed_sample_data(&self) {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);

        self.add_species(1, "Bottlenose dolphin")
            .add_species(2, "California sea lion")
            .add_species(3, "Beluga whale");

        self.add_subject(1, "Nova", 1, date(2018, 4, 12))
            .add_subject(2, "Triton", 2, date(2020, 9, 3))
            .add_subject(3, "Marlowe", 3, date(2015, 1, 27))
            .add_subject(4, "Pike", 1, date(2021, 6, 30));

        self.add_experiment_type(1, "intelligence", 30.0)
            .add_experiment_type(2, "obedience", 10.0)
            .add_experiment_type(3, "aggression", 15.0);

        self.add_experiment(1, 1, 1, date(2024, 2, 14), 27.0)
            .add_experiment(2, 2, 2, date(2024, 3, 2), 6.0)
            .add_experiment(3, 3, 3, date(2024, 1, 20), 14.0)
            .add_experiment(4, 4, 1, date(2024, 4, 8), 12.0)
            .add_experiment(5, 1, 2, date(2023, 11, 5), 9.0)
            .add_experiment(6, 2, 3, date(2024, 5, 19), 3.0);
    }
}

#[async_trait]
impl ExperimentStore for InMemoryStore {
    async fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        let tables = self.read()?;
        let mut subjects: Vec<Subject> = tables
            .subjects
            .iter()
            .filter_map(|s| {
                let species_name = tables.species_name(s.species_id)?;
                Some(Subject {
                    subject_id: s.subject_id,
                    subject_name: s.subject_name.clone(),
                    species_name: species_name.to_string(),
                    date_of_birth: s.date_of_birth,
                })
            })
            .collect();

        subjects.sort_by(|a, b| b.date_of_birth.cmp(&a.date_of_birth));
        Ok(subjects)
    }

    async fn list_experiments(&self, filter: &ExperimentFilter) -> StoreResult<Vec<Experiment>> {
        let tables = self.read()?;
        let mut experiments: Vec<Experiment> = tables
            .experiments
            .iter()
            .filter_map(|row| tables.join_experiment(row))
            .filter(|(_, experiment_type, _)| match filter.experiment_type {
                Some(wanted) => experiment_type.type_name.eq_ignore_ascii_case(wanted.as_str()),
                None => true,
            })
            .filter(|(_, _, percentage)| match filter.min_score {
                Some(min_score) => *percentage > f64::from(min_score),
                None => true,
            })
            .map(|(experiment, _, _)| experiment)
            .collect();

        experiments.sort_by(|a, b| b.experiment_date.cmp(&a.experiment_date));
        Ok(experiments)
    }

    async fn get_experiment_by_id(&self, experiment_id: i64) -> StoreResult<Option<Experiment>> {
        let tables = self.read()?;
        Ok(tables
            .experiments
            .iter()
            .find(|row| row.experiment_id == experiment_id)
            .and_then(|row| tables.join_experiment(row))
            .map(|(experiment, _, _)| experiment))
    }

    async fn delete_experiment(&self, experiment_id: i64) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let before = tables.experiments.len();
        tables.experiments.retain(|row| row.experiment_id != experiment_id);
        Ok(tables.experiments.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperimentType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = InMemoryStore::new();
        assert!(store.list_subjects().await.unwrap().is_empty());
        assert!(store
            .list_experiments(&ExperimentFilter::new())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_subjects_newest_first() {
        let store = InMemoryStore::with_sample_data();
        let subjects = store.list_subjects().await.unwrap();

        assert_eq!(subjects.len(), 4);
        assert!(subjects
            .windows(2)
            .all(|w| w[0].date_of_birth >= w[1].date_of_birth));
        assert_eq!(subjects[0].subject_name, "Pike");
        assert_eq!(subjects[0].species_name, "Bottlenose dolphin");
    }

    #[tokio::test]
    async fn test_score_normalization() {
        let store = InMemoryStore::new();
        store
            .add_species(1, "Orca")
            .add_subject(1, "Kali", 1, date(2019, 2, 2))
            .add_experiment_type(1, "intelligence", 50.0)
            .add_experiment(1, 1, 1, date(2024, 1, 1), 45.0);

        let experiment = store.get_experiment_by_id(1).await.unwrap().unwrap();
        assert_eq!(experiment.score, "90.0%");
        assert_eq!(experiment.species, "Orca");
        assert_eq!(experiment.experiment_type, "intelligence");
    }

    #[tokio::test]
    async fn test_type_filter_is_case_insensitive() {
        let store = InMemoryStore::new();
        store
            .add_species(1, "Orca")
            .add_subject(1, "Kali", 1, date(2019, 2, 2))
            .add_experiment_type(1, "Intelligence", 10.0)
            .add_experiment_type(2, "obedience", 10.0)
            .add_experiment(1, 1, 1, date(2024, 1, 1), 5.0)
            .add_experiment(2, 1, 2, date(2024, 1, 2), 5.0);

        let filter = ExperimentFilter::new().with_type(ExperimentType::Intelligence);
        let experiments = store.list_experiments(&filter).await.unwrap();

        assert_eq!(experiments.len(), 1);
        assert_eq!(experiments[0].experiment_id, 1);
    }

    #[tokio::test]
    async fn test_min_score_is_strict() {
        let store = InMemoryStore::new();
        store
            .add_species(1, "Orca")
            .add_subject(1, "Kali", 1, date(2019, 2, 2))
            .add_experiment_type(1, "obedience", 10.0)
            .add_experiment(1, 1, 1, date(2024, 1, 1), 5.0)
            .add_experiment(2, 1, 1, date(2024, 1, 2), 6.0);

        let filter = ExperimentFilter::new().with_min_score(50);
        let experiments = store.list_experiments(&filter).await.unwrap();

        assert_eq!(experiments.len(), 1);
        assert_eq!(experiments[0].score, "60.0%");
    }

    #[tokio::test]
    async fn test_dangling_references_are_not_joined() {
        let store = InMemoryStore::new();
        store
            .add_species(1, "Orca")
            .add_subject(1, "Kali", 1, date(2019, 2, 2))
            .add_subject(2, "Ghost", 99, date(2019, 2, 2))
            .add_experiment_type(1, "obedience", 10.0)
            .add_experiment(1, 1, 7, date(2024, 1, 1), 5.0);

        assert_eq!(store.list_subjects().await.unwrap().len(), 1);
        assert!(store.get_experiment_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = InMemoryStore::with_sample_data();
        let before = store.experiment_count().unwrap();

        assert!(store.delete_experiment(3).await.unwrap());
        assert_eq!(store.experiment_count().unwrap(), before - 1);
        assert!(store.get_experiment_by_id(3).await.unwrap().is_none());

        assert!(!store.delete_experiment(3).await.unwrap());
        assert_eq!(store.experiment_count().unwrap(), before - 1);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = std::sync::Arc::new(InMemoryStore::with_sample_data());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.tables.write().unwrap();
            panic!("poison the dataset lock");
        })
        .join();

        assert!(matches!(
            store.experiment_count(),
            Err(StoreError::Unavailable(_))
        ));
    }
}

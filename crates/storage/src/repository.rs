use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{LanguageFilter, Phrase, PhraseId, QuizSummary, SummaryError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a finished quiz.
///
/// This mirrors the domain `QuizSummary` so repositories can
/// serialize/deserialize without leaking storage concerns into the domain
/// layer. The redundant `total` column travels with the record and is
/// re-checked on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub timed_out: u32,
}

impl SummaryRecord {
    #[must_use]
    pub fn from_summary(summary: &QuizSummary) -> Self {
        Self {
            started_at: summary.started_at(),
            completed_at: summary.completed_at(),
            total: summary.total(),
            correct: summary.correct(),
            wrong: summary.wrong(),
            timed_out: summary.timed_out(),
        }
    }

    /// Convert the record back into a domain `QuizSummary`.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError` if the stored counts or time range fail the
    /// domain validation.
    pub fn into_summary(self) -> Result<QuizSummary, SummaryError> {
        QuizSummary::from_persisted(
            self.started_at,
            self.completed_at,
            self.total,
            self.correct,
            self.wrong,
            self.timed_out,
        )
    }
}

/// Source of quiz candidate pools.
///
/// The quiz engine treats the backing store as an external collaborator: a
/// failing source is indistinguishable from an empty one at the session
/// boundary, so sessions never start against partial data.
#[async_trait]
pub trait PhraseRepository: Send + Sync {
    /// Persist or update a phrase.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the phrase cannot be stored.
    async fn upsert_phrase(&self, phrase: &Phrase) -> Result<(), StorageError>;

    /// Fetch all phrases matching a language filter, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_phrases(&self, filter: &LanguageFilter) -> Result<Vec<Phrase>, StorageError>;
}

/// Sink for finished quiz summaries.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Append a summary, returning its storage id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be stored.
    async fn append_summary(&self, summary: &QuizSummary) -> Result<i64, StorageError>;

    /// Fetch a stored summary by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_summary(&self, id: i64) -> Result<QuizSummary, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    phrases: Arc<Mutex<BTreeMap<PhraseId, Phrase>>>,
    summaries: Arc<Mutex<Vec<SummaryRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phrases: Arc::new(Mutex::new(BTreeMap::new())),
            summaries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PhraseRepository for InMemoryRepository {
    async fn upsert_phrase(&self, phrase: &Phrase) -> Result<(), StorageError> {
        let mut guard = self
            .phrases
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(phrase.id(), phrase.clone());
        Ok(())
    }

    async fn list_phrases(&self, filter: &LanguageFilter) -> Result<Vec<Phrase>, StorageError> {
        let guard = self
            .phrases
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .filter(|phrase| filter.matches(phrase))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn append_summary(&self, summary: &QuizSummary) -> Result<i64, StorageError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(SummaryRecord::from_summary(summary));
        let id = i64::try_from(guard.len())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(id)
    }

    async fn get_summary(&self, id: i64) -> Result<QuizSummary, StorageError> {
        let record = {
            let guard = self
                .summaries
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            let index = usize::try_from(id - 1).map_err(|_| StorageError::NotFound)?;
            guard.get(index).cloned().ok_or(StorageError::NotFound)?
        };
        record
            .into_summary()
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Aggregates both repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub phrases: Arc<dyn PhraseRepository>,
    pub results: Arc<dyn QuizResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let phrases: Arc<dyn PhraseRepository> = Arc::new(repo.clone());
        let results: Arc<dyn QuizResultRepository> = Arc::new(repo);
        Self { phrases, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Language, PhraseDraft};
    use quiz_core::time::fixed_now;

    fn build_phrase(id: u64, source_language: &str, target_language: &str) -> Phrase {
        PhraseDraft {
            source_text: format!("source {id}"),
            source_language: source_language.to_string(),
            target_text: format!("target {id}"),
            target_language: target_language.to_string(),
            tags: vec!["basics".to_string()],
        }
        .validate()
        .unwrap()
        .assign_id(PhraseId::new(id))
    }

    fn filter(source: &str, target: &str) -> LanguageFilter {
        LanguageFilter::new(
            Language::new(source).unwrap(),
            Language::new(target).unwrap(),
        )
    }

    #[tokio::test]
    async fn lists_only_matching_phrases() {
        let repo = InMemoryRepository::new();
        repo.upsert_phrase(&build_phrase(1, "German", "English"))
            .await
            .unwrap();
        repo.upsert_phrase(&build_phrase(2, "French", "English"))
            .await
            .unwrap();
        repo.upsert_phrase(&build_phrase(3, "german", "english"))
            .await
            .unwrap();

        let pool = repo
            .list_phrases(&filter("German", "English"))
            .await
            .unwrap();
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|p| p.id() != PhraseId::new(2)));
    }

    #[tokio::test]
    async fn upsert_replaces_existing_phrase() {
        let repo = InMemoryRepository::new();
        repo.upsert_phrase(&build_phrase(1, "German", "English"))
            .await
            .unwrap();
        repo.upsert_phrase(&build_phrase(1, "German", "English"))
            .await
            .unwrap();

        let pool = repo
            .list_phrases(&filter("German", "English"))
            .await
            .unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[tokio::test]
    async fn summary_round_trips_by_id() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();
        let summary = QuizSummary::from_counts(now, now, 3, 1, 1).unwrap();

        let id = repo.append_summary(&summary).await.unwrap();
        let fetched = repo.get_summary(id).await.unwrap();
        assert_eq!(fetched, summary);
        assert_eq!(fetched.total(), 5);
    }

    #[tokio::test]
    async fn missing_summary_is_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.get_summary(7).await,
            Err(StorageError::NotFound)
        ));
    }

    #[test]
    fn corrupted_record_fails_validation() {
        let now = fixed_now();
        let record = SummaryRecord {
            started_at: now,
            completed_at: now,
            total: 9,
            correct: 1,
            wrong: 1,
            timed_out: 1,
        };
        assert!(record.into_summary().is_err());
    }
}

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("total answers ({total}) does not match outcome counts ({sum})")]
    CountMismatch { total: u32, sum: u32 },
}

/// Aggregate result of a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    correct: u32,
    wrong: u32,
    timed_out: u32,
}

impl QuizSummary {
    /// Build a summary from session counters.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_counts(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        correct: u32,
        wrong: u32,
        timed_out: u32,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }

        Ok(Self {
            started_at,
            completed_at,
            correct,
            wrong,
            timed_out,
        })
    }

    /// Rehydrate a summary from persisted storage.
    ///
    /// The stored total is redundant with the outcome counts; it is checked
    /// here so corrupted rows fail loudly instead of skewing statistics.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::CountMismatch` if totals do not align.
    /// Returns `SummaryError::InvalidTimeRange` if the time range is inverted.
    pub fn from_persisted(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total: u32,
        correct: u32,
        wrong: u32,
        timed_out: u32,
    ) -> Result<Self, SummaryError> {
        let sum = correct + wrong + timed_out;
        if sum != total {
            return Err(SummaryError::CountMismatch { total, sum });
        }

        Self::from_counts(started_at, completed_at, correct, wrong, timed_out)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn timed_out(&self) -> u32 {
        self.timed_out
    }

    /// Total number of resolved questions, including timeouts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct + self.wrong + self.timed_out
    }
}

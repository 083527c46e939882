//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SummaryError};
use quiz_core::pacing::PacingError;
use storage::StorageError;

/// Errors emitted by the quiz subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("not enough phrases for a quiz: need at least 2, got {len}")]
    PoolTooSmall { len: usize },
    #[error("quiz session already completed")]
    Completed,
    #[error("quiz session is still running")]
    NotCompleted,
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Pacing(#[from] PacingError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

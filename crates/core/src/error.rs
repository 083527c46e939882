use thiserror::Error;

use crate::model::{PhraseError, QuestionError, SummaryError};
use crate::pacing::PacingError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Phrase(#[from] PhraseError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Pacing(#[from] PacingError),
}

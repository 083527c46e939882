use thiserror::Error;

use crate::model::ids::OptionId;

/// Which way a question asks the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Prompt in the source language, options in the target language.
    Forward,
    /// Prompt in the target language, options in the source language.
    Reverse,
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    id: OptionId,
    text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> OptionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A fully built multiple-choice question.
///
/// Invariants are enforced at construction: at least two options, distinct
/// option ids, and the correct id present among the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<AnswerOption>,
    correct_option_id: OptionId,
    direction: Direction,
}

impl Question {
    /// Build a question, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` with fewer than two options,
    /// `QuestionError::DuplicateOption` when two options share an id, and
    /// `QuestionError::CorrectOptionMissing` when the correct id is not among
    /// the options.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_option_id: OptionId,
        direction: Direction,
    ) -> Result<Self, QuestionError> {
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }

        for (index, option) in options.iter().enumerate() {
            if options[..index].iter().any(|o| o.id() == option.id()) {
                return Err(QuestionError::DuplicateOption { id: option.id() });
            }
        }

        if !options.iter().any(|o| o.id() == correct_option_id) {
            return Err(QuestionError::CorrectOptionMissing {
                id: correct_option_id,
            });
        }

        Ok(Self {
            prompt: prompt.into(),
            options,
            correct_option_id,
            direction,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_id(&self) -> OptionId {
        self.correct_option_id
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the given option answers this question correctly.
    #[must_use]
    pub fn is_correct(&self, option_id: OptionId) -> bool {
        option_id == self.correct_option_id
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },
    #[error("duplicate option id {id}")]
    DuplicateOption { id: OptionId },
    #[error("correct option {id} is not among the options")]
    CorrectOptionMissing { id: OptionId },
}

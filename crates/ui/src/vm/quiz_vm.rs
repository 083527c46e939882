use quiz_core::model::{LanguageFilter, OptionId, Question};
use services::{AnswerJudgment, QuizError, QuizLoopService, QuizService, TickOutcome};
use tracing::warn;

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Countdown running, waiting for an answer.
    Question,
    /// Question resolved; the result is on screen until the next advance.
    Reveal,
}

pub struct QuizVm {
    session: QuizService,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizService) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.session.answered() {
            QuizPhase::Reveal
        } else {
            QuizPhase::Question
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        self.session.question()
    }

    #[must_use]
    pub fn question_number(&self) -> u32 {
        self.session.question_number()
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.session.time_left()
    }

    #[must_use]
    pub fn budget(&self) -> u32 {
        self.session.budget()
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.session.correct_count()
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.session.wrong_count()
    }

    #[must_use]
    pub fn timeout_count(&self) -> u32 {
        self.session.timeout_count()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<OptionId> {
        self.session.selected_option()
    }

    #[must_use]
    pub fn user_answered(&self) -> bool {
        self.session.user_answered()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Seconds between session start and completion, if completed.
    #[must_use]
    pub fn duration_seconds(&self) -> Option<u32> {
        let completed_at = self.session.completed_at()?;
        let elapsed = completed_at - self.session.started_at();
        u32::try_from(elapsed.num_seconds().max(0)).ok()
    }

    pub fn submit(&mut self, option_id: OptionId) -> Option<AnswerJudgment> {
        self.session.submit_answer(option_id)
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.session.tick()
    }

    /// Advance past the reveal. Returns whether a new question was entered.
    pub fn advance(&mut self) -> bool {
        match self.session.advance() {
            Ok(advanced) => advanced,
            Err(err) => {
                warn!(error = %err, "failed to build the next question");
                false
            }
        }
    }

    #[must_use]
    pub fn session_mut(&mut self) -> &mut QuizService {
        &mut self.session
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when the filtered pool cannot support a
/// quiz. Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(
    quiz_loop: &QuizLoopService,
    filter: &LanguageFilter,
) -> Result<QuizVm, ViewError> {
    let session = match quiz_loop.start_quiz(filter).await {
        Ok(session) => session,
        Err(QuizError::PoolTooSmall { .. }) => return Err(ViewError::EmptyQuiz),
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(QuizVm::new(session))
}

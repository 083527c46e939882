use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{OptionId, Phrase, Question, QuizSummary};
use quiz_core::pacing::{AnswerOutcome, TimeBudgetBounds};

use crate::error::QuizError;
use super::selector::QuestionSelector;

//
// ─── TRANSITION RESULTS ────────────────────────────────────────────────────────
//

/// What a submitted answer resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerJudgment {
    pub outcome: AnswerOutcome,
    pub selected: OptionId,
    pub correct_option_id: OptionId,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown still running.
    Counting { remaining: u32 },
    /// The countdown just hit zero; the timeout transition fired.
    TimedOut,
    /// The tick had no effect (question already resolved, or session done).
    Idle,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a candidate pool.
///
/// The session owns all per-question state and mutates it only through the
/// transitions below. It is open-ended: questions keep coming until
/// `complete` is called, and the per-question time budget walks cumulatively
/// across the whole session.
///
/// No network or persistence side effect happens here; the workflow layer
/// owns those.
pub struct QuizService {
    phrases: Vec<Phrase>,
    bounds: TimeBudgetBounds,
    selector: QuestionSelector,
    question: Question,
    question_number: u32,
    budget: u32,
    time_left: u32,
    answered: bool,
    user_answered: bool,
    selected_option: Option<OptionId>,
    pending_outcome: Option<AnswerOutcome>,
    correct: u32,
    wrong: u32,
    timed_out: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    summary_id: Option<i64>,
}

impl QuizService {
    /// Start a session over the given pool.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::PoolTooSmall` if the pool cannot support even one
    /// question. This is the only moment a configuration error can surface;
    /// once a session exists, transitions never fail on pool size.
    pub fn start(
        phrases: Vec<Phrase>,
        bounds: TimeBudgetBounds,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let selector = QuestionSelector::new();
        let question = selector.select(&phrases, &mut rand::rng())?;
        let budget = bounds.initial_budget();

        Ok(Self {
            phrases,
            bounds,
            selector,
            question,
            question_number: 1,
            budget,
            time_left: budget,
            answered: false,
            user_answered: false,
            selected_option: None,
            pending_outcome: None,
            correct: 0,
            wrong: 0,
            timed_out: 0,
            started_at,
            completed_at: None,
            summary_id: None,
        })
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// 1-based ordinal of the current question.
    #[must_use]
    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn bounds(&self) -> TimeBudgetBounds {
        self.bounds
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn user_answered(&self) -> bool {
        self.user_answered
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<OptionId> {
        self.selected_option
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn timeout_count(&self) -> u32 {
        self.timed_out
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn summary_id(&self) -> Option<i64> {
        self.summary_id
    }

    pub fn set_summary_id(&mut self, id: i64) {
        self.summary_id = Some(id);
    }

    /// Submit an answer for the current question.
    ///
    /// Returns `None` when the question is already resolved (double
    /// submission, or a submit racing a timeout) — a silent no-op, not an
    /// error. Otherwise records the outcome, bumps the matching counter, and
    /// leaves the session in the resolving state until [`Self::advance`].
    pub fn submit_answer(&mut self, option_id: OptionId) -> Option<AnswerJudgment> {
        if self.answered || self.is_complete() {
            return None;
        }

        let outcome = if self.question.is_correct(option_id) {
            self.correct += 1;
            AnswerOutcome::Correct
        } else {
            self.wrong += 1;
            AnswerOutcome::Wrong
        };

        self.answered = true;
        self.user_answered = true;
        self.selected_option = Some(option_id);
        self.pending_outcome = Some(outcome);

        Some(AnswerJudgment {
            outcome,
            selected: option_id,
            correct_option_id: self.question.correct_option_id(),
        })
    }

    /// One whole-second countdown step.
    ///
    /// The caller drives this from a periodic scheduler and must skip ticks
    /// while the shared activity is paused. Once the question is resolved
    /// (answered or timed out) further ticks are `Idle`, so the timeout
    /// transition can fire at most once per question.
    pub fn tick(&mut self) -> TickOutcome {
        if self.answered || self.is_complete() {
            return TickOutcome::Idle;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return TickOutcome::Counting {
                remaining: self.time_left,
            };
        }

        // Timeout: counts like a miss, but is not user-submitted and does
        // not relax the next budget.
        self.answered = true;
        self.user_answered = false;
        self.selected_option = None;
        self.timed_out += 1;
        self.pending_outcome = Some(AnswerOutcome::TimedOut);
        TickOutcome::TimedOut
    }

    /// Leave the resolving state and enter the next question.
    ///
    /// Applies the stored outcome to the budget walk, resets answer state,
    /// and builds a fresh question. Returns `false` (and changes nothing)
    /// unless the current question is resolved and the session is live.
    ///
    /// # Errors
    ///
    /// Propagates question-build failures, which cannot occur for a pool that
    /// passed the start validation.
    pub fn advance(&mut self) -> Result<bool, QuizError> {
        if self.is_complete() {
            return Ok(false);
        }
        let Some(outcome) = self.pending_outcome.take() else {
            return Ok(false);
        };

        self.budget = self.bounds.next_budget(self.budget, outcome);
        self.time_left = self.budget;
        self.answered = false;
        self.user_answered = false;
        self.selected_option = None;
        self.question_number += 1;
        self.question = self.selector.select(&self.phrases, &mut rand::rng())?;
        Ok(true)
    }

    /// End the session. Idempotent: the first completion time wins.
    pub fn complete(&mut self, completed_at: DateTime<Utc>) {
        if self.completed_at.is_none() {
            self.completed_at = Some(completed_at);
        }
    }

    /// Build the aggregate summary of a completed session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotCompleted` while the session is live.
    pub fn build_summary(&self) -> Result<QuizSummary, QuizError> {
        let completed_at = self.completed_at.ok_or(QuizError::NotCompleted)?;
        let summary = QuizSummary::from_counts(
            self.started_at,
            completed_at,
            self.correct,
            self.wrong,
            self.timed_out,
        )?;
        Ok(summary)
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("pool_len", &self.phrases.len())
            .field("question_number", &self.question_number)
            .field("budget", &self.budget)
            .field("time_left", &self.time_left)
            .field("answered", &self.answered)
            .field("correct", &self.correct)
            .field("wrong", &self.wrong)
            .field("timed_out", &self.timed_out)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacingError {
    #[error("minimum budget must be at least 1 second, got {provided}")]
    ZeroMin { provided: u32 },
    #[error("minimum budget ({min}) must not exceed maximum ({max})")]
    InvertedBounds { min: u32, max: u32 },
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// How the previous question was resolved.
///
/// `Correct` and `Wrong` are user-submitted answers; `TimedOut` is the
/// countdown expiring with no submission. The distinction matters: wrong
/// submissions relax the pace, timeouts keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    TimedOut,
}

//
// ─── TIME BUDGET ───────────────────────────────────────────────────────────────
//

/// Per-question time budget bounds, fixed for a session's lifetime.
///
/// The budget walks cumulatively across the session: each question's budget
/// derives from the previous question's budget and outcome, never resetting
/// to `start` mid-session.
///
/// # Examples
///
/// ```
/// # use quiz_core::pacing::{AnswerOutcome, TimeBudgetBounds};
/// let bounds = TimeBudgetBounds::new(5, 15, 30)?;
/// let first = bounds.initial_budget();
/// assert_eq!(first, 15);
/// assert_eq!(bounds.next_budget(first, AnswerOutcome::Correct), 14);
/// # Ok::<(), quiz_core::pacing::PacingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBudgetBounds {
    min: u32,
    start: u32,
    max: u32,
}

impl TimeBudgetBounds {
    /// Create validated bounds.
    ///
    /// `start` may lie outside `[min, max]`; it is clamped on first use.
    ///
    /// # Errors
    ///
    /// - `ZeroMin` if `min` is zero (a zero budget would time out instantly)
    /// - `InvertedBounds` if `min > max`
    pub fn new(min: u32, start: u32, max: u32) -> Result<Self, PacingError> {
        if min == 0 {
            return Err(PacingError::ZeroMin { provided: min });
        }
        if min > max {
            return Err(PacingError::InvertedBounds { min, max });
        }
        Ok(Self { min, start, max })
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Clamp a budget into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, seconds: u32) -> u32 {
        seconds.clamp(self.min, self.max)
    }

    /// Budget for the first question of a session.
    #[must_use]
    pub fn initial_budget(&self) -> u32 {
        self.clamp(self.start)
    }

    /// Budget for the next question, given the previous question's budget
    /// and outcome.
    ///
    /// - Correct answer: one second less, down to `min`.
    /// - Wrong answer: one second more, up to `max`.
    /// - Timeout: unchanged — running out of time already cost the question,
    ///   so the pace does not relax further.
    #[must_use]
    pub fn next_budget(&self, previous: u32, outcome: AnswerOutcome) -> u32 {
        let next = match outcome {
            AnswerOutcome::Correct => previous.saturating_sub(1),
            AnswerOutcome::Wrong => previous.saturating_add(1),
            AnswerOutcome::TimedOut => previous,
        };
        self.clamp(next)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> TimeBudgetBounds {
        TimeBudgetBounds::new(5, 15, 30).unwrap()
    }

    #[test]
    fn rejects_zero_min() {
        assert!(matches!(
            TimeBudgetBounds::new(0, 10, 20),
            Err(PacingError::ZeroMin { provided: 0 })
        ));
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(matches!(
            TimeBudgetBounds::new(20, 10, 5),
            Err(PacingError::InvertedBounds { min: 20, max: 5 })
        ));
    }

    #[test]
    fn initial_budget_clamps_start() {
        assert_eq!(bounds().initial_budget(), 15);

        let low_start = TimeBudgetBounds::new(5, 2, 30).unwrap();
        assert_eq!(low_start.initial_budget(), 5);

        let high_start = TimeBudgetBounds::new(5, 99, 30).unwrap();
        assert_eq!(high_start.initial_budget(), 30);
    }

    #[test]
    fn correct_answers_tighten_by_one() {
        let b = bounds();
        assert_eq!(b.next_budget(15, AnswerOutcome::Correct), 14);
        assert_eq!(b.next_budget(5, AnswerOutcome::Correct), 5);
    }

    #[test]
    fn wrong_answers_relax_by_one() {
        let b = bounds();
        assert_eq!(b.next_budget(15, AnswerOutcome::Wrong), 16);
        assert_eq!(b.next_budget(30, AnswerOutcome::Wrong), 30);
    }

    #[test]
    fn timeouts_keep_the_budget() {
        let b = bounds();
        assert_eq!(b.next_budget(14, AnswerOutcome::TimedOut), 14);
        assert_eq!(b.next_budget(5, AnswerOutcome::TimedOut), 5);
        assert_eq!(b.next_budget(30, AnswerOutcome::TimedOut), 30);
    }

    #[test]
    fn next_budget_stays_within_bounds_for_all_inputs() {
        let b = bounds();
        for previous in b.min()..=b.max() {
            for outcome in [
                AnswerOutcome::Correct,
                AnswerOutcome::Wrong,
                AnswerOutcome::TimedOut,
            ] {
                let next = b.next_budget(previous, outcome);
                assert!(next >= b.min(), "budget {next} fell below min");
                assert!(next <= b.max(), "budget {next} rose above max");
            }
        }
    }

    #[test]
    fn cumulative_walk_matches_expected_sequence() {
        // min=5, start=15, max=30: correct -> 14, wrong -> 15, timeout at 15 -> 15.
        let b = bounds();
        let first = b.initial_budget();
        assert_eq!(first, 15);

        let after_correct = b.next_budget(first, AnswerOutcome::Correct);
        assert_eq!(after_correct, 14);

        let after_wrong = b.next_budget(after_correct, AnswerOutcome::Wrong);
        assert_eq!(after_wrong, 15);

        let after_timeout = b.next_budget(after_wrong, AnswerOutcome::TimedOut);
        assert_eq!(after_timeout, 15);
    }

    #[test]
    fn walk_never_resets_to_start() {
        let b = bounds();
        let mut budget = b.initial_budget();
        for _ in 0..20 {
            budget = b.next_budget(budget, AnswerOutcome::Correct);
        }
        assert_eq!(budget, b.min());

        budget = b.next_budget(budget, AnswerOutcome::Wrong);
        assert_eq!(budget, b.min() + 1);
    }
}

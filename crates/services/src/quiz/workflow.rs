use std::sync::Arc;

use quiz_core::model::LanguageFilter;
use quiz_core::pacing::TimeBudgetBounds;
use storage::{PhraseRepository, QuizResultRepository};
use tracing::warn;

use crate::Clock;
use crate::error::QuizError;
use super::service::QuizService;

/// Orchestrates quiz start and summary persistence.
///
/// This is the only place the quiz touches storage. Both collaborators are
/// treated as external: a failing phrase source looks like an empty pool,
/// and a failing result sink never blocks session teardown.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    phrases: Arc<dyn PhraseRepository>,
    results: Arc<dyn QuizResultRepository>,
    bounds: TimeBudgetBounds,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        phrases: Arc<dyn PhraseRepository>,
        results: Arc<dyn QuizResultRepository>,
        bounds: TimeBudgetBounds,
    ) -> Self {
        Self {
            clock,
            phrases,
            results,
            bounds,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> TimeBudgetBounds {
        self.bounds
    }

    /// Start a new quiz session for the given language filter.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::PoolTooSmall` when the filtered pool cannot
    /// support a quiz — including when the phrase source fails outright,
    /// which is deliberately indistinguishable from "no phrases available".
    pub async fn start_quiz(&self, filter: &LanguageFilter) -> Result<QuizService, QuizError> {
        let pool = match self.phrases.list_phrases(filter).await {
            Ok(pool) => pool,
            Err(err) => {
                warn!(error = %err, "phrase source failed; treating pool as empty");
                Vec::new()
            }
        };
        QuizService::start(pool, self.bounds, self.clock.now())
    }

    /// Complete the session and hand its summary to the result sink.
    ///
    /// A sink failure is logged and swallowed: teardown and any pending
    /// navigation proceed regardless, and the failure is never surfaced to
    /// the state machine. Returns the stored id when the save succeeded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Summary` if the session's counters cannot form a
    /// valid summary.
    pub async fn finish_quiz(&self, session: &mut QuizService) -> Result<Option<i64>, QuizError> {
        session.complete(self.clock.now());

        if let Some(id) = session.summary_id() {
            return Ok(Some(id));
        }

        let summary = session.build_summary()?;
        match self.results.append_summary(&summary).await {
            Ok(id) => {
                session.set_summary_id(id);
                Ok(Some(id))
            }
            Err(err) => {
                warn!(error = %err, "failed to persist quiz summary");
                Ok(None)
            }
        }
    }
}

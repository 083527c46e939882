use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{AnswerOption, Direction, Phrase, Question};

use crate::error::QuizError;

/// Smallest pool a session can be built from: one prompt plus one distractor.
pub const MIN_POOL_SIZE: usize = 2;

/// Builds multiple-choice questions from a candidate pool.
///
/// Each build picks the prompt phrase uniformly at random, flips the
/// translation direction independently of history, and draws distractors
/// without replacement from shuffled other entries. Option order is
/// re-shuffled on every build.
#[derive(Debug, Clone, Copy)]
pub struct QuestionSelector {
    distractors: usize,
}

impl QuestionSelector {
    /// Selector with the standard five-option layout (one correct, four
    /// distractors).
    #[must_use]
    pub fn new() -> Self {
        Self { distractors: 4 }
    }

    /// Override the distractor count (tests use smaller layouts).
    #[must_use]
    pub fn with_distractors(mut self, distractors: usize) -> Self {
        self.distractors = distractors;
        self
    }

    /// Build the next question from the pool.
    ///
    /// Pools smaller than the configured option count degrade gracefully to
    /// `pool.len() - 1` distractors rather than failing.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::PoolTooSmall` when fewer than [`MIN_POOL_SIZE`]
    /// phrases are available.
    pub fn select<R: Rng + ?Sized>(
        &self,
        pool: &[Phrase],
        rng: &mut R,
    ) -> Result<Question, QuizError> {
        if pool.len() < MIN_POOL_SIZE {
            return Err(QuizError::PoolTooSmall { len: pool.len() });
        }

        let prompt_index = rng.random_range(0..pool.len());
        let phrase = &pool[prompt_index];
        let direction = if rng.random_bool(0.5) {
            Direction::Forward
        } else {
            Direction::Reverse
        };

        let mut other_indices: Vec<usize> =
            (0..pool.len()).filter(|i| *i != prompt_index).collect();
        other_indices.shuffle(rng);

        let take = self.distractors.min(other_indices.len());
        let mut options = Vec::with_capacity(take + 1);
        options.push(AnswerOption::new(
            phrase.id().into(),
            option_text(phrase, direction),
        ));
        for index in other_indices.into_iter().take(take) {
            let distractor = &pool[index];
            options.push(AnswerOption::new(
                distractor.id().into(),
                option_text(distractor, direction),
            ));
        }
        options.shuffle(rng);

        let question = Question::new(
            prompt_text(phrase, direction),
            options,
            phrase.id().into(),
            direction,
        )?;
        Ok(question)
    }
}

impl Default for QuestionSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_text(phrase: &Phrase, direction: Direction) -> String {
    match direction {
        Direction::Forward => phrase.source_text().to_string(),
        Direction::Reverse => phrase.target_text().to_string(),
    }
}

fn option_text(phrase: &Phrase, direction: Direction) -> String {
    match direction {
        Direction::Forward => phrase.target_text().to_string(),
        Direction::Reverse => phrase.source_text().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{OptionId, PhraseDraft, PhraseId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn build_pool(len: u64) -> Vec<Phrase> {
        (1..=len)
            .map(|id| {
                PhraseDraft {
                    source_text: format!("source {id}"),
                    source_language: "German".to_string(),
                    target_text: format!("target {id}"),
                    target_language: "English".to_string(),
                    tags: Vec::new(),
                }
                .validate()
                .unwrap()
                .assign_id(PhraseId::new(id))
            })
            .collect()
    }

    #[test]
    fn rejects_pools_below_minimum() {
        let selector = QuestionSelector::new();
        let mut rng = StdRng::seed_from_u64(1);

        let err = selector.select(&build_pool(1), &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::PoolTooSmall { len: 1 }));

        let err = selector.select(&[], &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::PoolTooSmall { len: 0 }));
    }

    #[test]
    fn small_pool_falls_back_to_fewer_distractors() {
        let selector = QuestionSelector::new();
        let mut rng = StdRng::seed_from_u64(2);
        let pool = build_pool(3);

        let question = selector.select(&pool, &mut rng).unwrap();
        assert_eq!(question.options().len(), 3);
    }

    #[test]
    fn full_pool_yields_five_distinct_options() {
        let selector = QuestionSelector::new();
        let mut rng = StdRng::seed_from_u64(3);
        let pool = build_pool(20);

        // Statistical sweep: every build carries exactly one correct option
        // and four distinct distractors drawn from the other entries.
        for _ in 0..1000 {
            let question = selector.select(&pool, &mut rng).unwrap();
            assert_eq!(question.options().len(), 5);

            let ids: HashSet<OptionId> =
                question.options().iter().map(|o| o.id()).collect();
            assert_eq!(ids.len(), 5, "distractor ids must be distinct");
            assert!(ids.contains(&question.correct_option_id()));

            let correct_count = question
                .options()
                .iter()
                .filter(|o| o.id() == question.correct_option_id())
                .count();
            assert_eq!(correct_count, 1);
        }
    }

    #[test]
    fn both_directions_appear_over_many_builds() {
        let selector = QuestionSelector::new();
        let mut rng = StdRng::seed_from_u64(4);
        let pool = build_pool(5);

        let mut forward = 0;
        let mut reverse = 0;
        for _ in 0..200 {
            match selector.select(&pool, &mut rng).unwrap().direction() {
                Direction::Forward => forward += 1,
                Direction::Reverse => reverse += 1,
            }
        }
        assert!(forward > 0 && reverse > 0);
    }

    #[test]
    fn prompt_and_options_follow_direction() {
        let selector = QuestionSelector::new().with_distractors(1);
        let mut rng = StdRng::seed_from_u64(5);
        let pool = build_pool(2);

        for _ in 0..50 {
            let question = selector.select(&pool, &mut rng).unwrap();
            match question.direction() {
                Direction::Forward => {
                    assert!(question.prompt().starts_with("source"));
                    assert!(question.options().iter().all(|o| o.text().starts_with("target")));
                }
                Direction::Reverse => {
                    assert!(question.prompt().starts_with("target"));
                    assert!(question.options().iter().all(|o| o.text().starts_with("source")));
                }
            }
        }
    }

    #[test]
    fn option_order_varies_between_builds() {
        let selector = QuestionSelector::new();
        let mut rng = StdRng::seed_from_u64(6);
        let pool = build_pool(20);

        let mut orders = HashSet::new();
        for _ in 0..50 {
            let question = selector.select(&pool, &mut rng).unwrap();
            let order: Vec<u64> = question.options().iter().map(|o| o.id().value()).collect();
            orders.insert(order);
        }
        assert!(orders.len() > 1, "option order should not be fixed");
    }
}

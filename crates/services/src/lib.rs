#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use quiz::{
    AnswerJudgment, GuardDecision, GuardEffect, NavigationGuard, QuestionSelector, QuizActivity,
    QuizLoopService, QuizService, TickOutcome,
};

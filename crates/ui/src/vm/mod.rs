mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{QuizPhase, QuizVm, start_quiz};
pub use time_fmt::format_seconds;

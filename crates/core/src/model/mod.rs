mod ids;
mod phrase;
mod question;
mod summary;

pub use ids::{OptionId, ParseIdError, PhraseId};
pub use phrase::{Language, LanguageFilter, Phrase, PhraseDraft, PhraseError, Tag, ValidatedPhrase};
pub use question::{AnswerOption, Direction, Question, QuestionError};
pub use summary::{QuizSummary, SummaryError};

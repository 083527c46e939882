#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    InMemoryRepository, PhraseRepository, QuizResultRepository, Storage, StorageError,
    SummaryRecord,
};

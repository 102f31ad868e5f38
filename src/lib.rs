pub mod ai;
pub mod config;
pub mod database;
pub mod export;
pub mod models;
pub mod store;

pub use models::{Flashcard, Language, LanguageFilter, NewFlashcard, QuizQuestion, QuizSession, QuizState};
pub use store::CardStore;

pub mod flashcard;
pub mod language;
pub mod learning_progress;
pub mod quiz_question;
pub mod quiz_session;
pub mod stats;

pub use flashcard::{Flashcard, NewFlashcard};
pub use language::{Language, LanguageFilter};
pub use learning_progress::MASTERY_THRESHOLD;
pub use quiz_question::{QuizQuestion, generate_question};
pub use quiz_session::{QuizSession, QuizState};
pub use stats::UserStats;

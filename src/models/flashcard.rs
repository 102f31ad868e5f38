//! Flashcard is a term/translation pair between two languages, plus learning progress.
use super::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub term: String,
    pub translation: String,
    pub source_language: Language,
    pub target_language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    pub correct_count: u32,
    pub is_learned: bool,
    pub created_at: DateTime<Utc>,
}

/// User-supplied fields of a card that is about to be created.
#[derive(Clone, Debug)]
pub struct NewFlashcard {
    pub term: String,
    pub translation: String,
    pub source_language: Language,
    pub target_language: Language,
    pub example: Option<String>,
    pub comment: Option<String>,
}

impl NewFlashcard {
    pub fn new(
        term: impl Into<String>,
        translation: impl Into<String>,
        source_language: Language,
        target_language: Language,
    ) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
            source_language,
            target_language,
            example: None,
            comment: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = non_empty(example.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_empty(comment.into());
        self
    }

    /// Builds the stored card with zero progress.
    pub fn into_flashcard(self, id: String, created_at: DateTime<Utc>) -> Flashcard {
        Flashcard {
            id,
            term: self.term,
            translation: self.translation,
            source_language: self.source_language,
            target_language: self.target_language,
            example: self.example.and_then(non_empty),
            comment: self.comment.and_then(non_empty),
            last_reviewed: None,
            correct_count: 0,
            is_learned: false,
            created_at,
        }
    }
}

/// Form fields arrive as strings; an empty one means "not set".
pub fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

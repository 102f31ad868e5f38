//! Mastery rule for a single card.
//!
//! Progress is a bounded counter rather than a scheduling algorithm:
//! - A correct answer adds one; reaching `MASTERY_THRESHOLD` marks the card as learned
//! - An incorrect answer subtracts one (never below zero) and always clears "learned"
//! - Toggling "learned" by hand realigns the counter with the threshold

use super::Flashcard;
use chrono::{DateTime, Utc};

/// Correct answers needed before a card counts as learned.
pub const MASTERY_THRESHOLD: u32 = 10;

impl Flashcard {
    /// Applies one quiz answer to the card's progress.
    pub fn record_answer(&mut self, correct: bool, reviewed_at: DateTime<Utc>) {
        if correct {
            self.correct_count = self.correct_count.saturating_add(1);
            if self.correct_count >= MASTERY_THRESHOLD {
                self.is_learned = true;
            }
        } else {
            self.correct_count = self.correct_count.saturating_sub(1);
            self.is_learned = false;
        }
        self.last_reviewed = Some(reviewed_at);
    }

    /// Manual override of the learned flag. Leaves `last_reviewed` alone.
    pub fn toggle_learned(&mut self) {
        self.is_learned = !self.is_learned;
        self.correct_count = if self.is_learned { MASTERY_THRESHOLD } else { 0 };
    }
}

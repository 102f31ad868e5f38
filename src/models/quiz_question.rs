//! Multiple-choice question generation from the unlearned card pool.

use super::{Flashcard, LanguageFilter};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Only the most recently created unlearned cards are quizzed.
pub const QUIZ_POOL_SIZE: usize = 20;

/// Wrong options shown next to the correct translation.
pub const DISTRACTOR_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct QuizQuestion {
    pub flashcard: Flashcard,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

/// Unlearned cards matching the filter, newest first, capped at `QUIZ_POOL_SIZE`.
pub fn recent_unlearned(cards: &[Flashcard], filter: LanguageFilter) -> Vec<&Flashcard> {
    let mut pool: Vec<&Flashcard> = cards
        .iter()
        .filter(|card| !card.is_learned && filter.matches(card.source_language))
        .collect();

    // Stable sort: cards created at the same instant keep insertion order
    pool.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    pool.truncate(QUIZ_POOL_SIZE);
    pool
}

/// Picks a random subject from the recent pool and up to three distractors from the rest.
///
/// Returns `None` when the pool is empty. Options are not deduplicated: a distractor
/// whose translation equals the correct one shows up as a second identical option.
pub fn generate_question<R: Rng + ?Sized>(
    cards: &[Flashcard],
    filter: LanguageFilter,
    rng: &mut R,
) -> Option<QuizQuestion> {
    let pool = recent_unlearned(cards, filter);
    let subject = *pool.choose(rng)?;

    let others: Vec<&Flashcard> = pool
        .iter()
        .copied()
        .filter(|card| card.id != subject.id)
        .collect();

    let mut options: Vec<String> = others
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|card| card.translation.clone())
        .collect();
    options.push(subject.translation.clone());
    options.shuffle(rng);

    tracing::debug!(
        card_id = %subject.id,
        options = options.len(),
        "generated quiz question"
    );

    Some(QuizQuestion {
        flashcard: subject.clone(),
        options,
        correct_answer: subject.translation.clone(),
    })
}

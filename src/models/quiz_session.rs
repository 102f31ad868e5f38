//! Quiz session: one question at a time, scored, with answers written back to the store.
//!
//! The session moves between three states:
//! - `NoQuestion`: nothing left to ask under the current filter
//! - `AwaitingAnswer`: a question is shown and the first answer will be taken
//! - `Answered`: feedback is shown until `next` is called

use super::quiz_question::{QuizQuestion, generate_question};
use super::{Flashcard, LanguageFilter};
use crate::store::CardStore;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub enum QuizState {
    NoQuestion,
    AwaitingAnswer(QuizQuestion),
    Answered {
        question: QuizQuestion,
        selected: String,
        correct: bool,
    },
}

pub struct QuizSession {
    filter: LanguageFilter,
    state: QuizState,
    score: u32,
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(filter: LanguageFilter, cards: &[Flashcard], rng: &mut R) -> Self {
        let mut session = Self {
            filter,
            state: QuizState::NoQuestion,
            score: 0,
        };
        session.generate(cards, rng);
        session
    }

    pub fn filter(&self) -> LanguageFilter {
        self.filter
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        match &self.state {
            QuizState::NoQuestion => None,
            QuizState::AwaitingAnswer(question) => Some(question),
            QuizState::Answered { question, .. } => Some(question),
        }
    }

    /// Switching filters always starts over: new question, score back to zero.
    pub fn set_filter<R: Rng + ?Sized>(
        &mut self,
        filter: LanguageFilter,
        cards: &[Flashcard],
        rng: &mut R,
    ) {
        self.filter = filter;
        self.score = 0;
        self.generate(cards, rng);
    }

    /// Scores the answer and records it against the subject card.
    ///
    /// Only the first answer to a question counts; returns `None` when the
    /// submission is ignored, otherwise whether it was correct.
    pub fn submit(&mut self, answer: &str, store: &mut CardStore) -> Option<bool> {
        let QuizState::AwaitingAnswer(question) = &self.state else {
            return None;
        };
        let question = question.clone();

        let correct = question.is_correct(answer);
        store.record_answer(&question.flashcard.id, correct);
        if correct {
            self.score += 1;
        }

        self.state = QuizState::Answered {
            question,
            selected: answer.to_string(),
            correct,
        };
        Some(correct)
    }

    /// Moves on after feedback. Ignored while a question is still unanswered.
    pub fn next<R: Rng + ?Sized>(&mut self, cards: &[Flashcard], rng: &mut R) {
        if matches!(self.state, QuizState::AwaitingAnswer(_)) {
            return;
        }
        self.generate(cards, rng);
    }

    /// Retries generation when idle, e.g. after cards were added.
    pub fn refresh<R: Rng + ?Sized>(&mut self, cards: &[Flashcard], rng: &mut R) {
        if self.state == QuizState::NoQuestion {
            self.generate(cards, rng);
        }
    }

    fn generate<R: Rng + ?Sized>(&mut self, cards: &[Flashcard], rng: &mut R) {
        self.state = match generate_question(cards, self.filter, rng) {
            Some(question) => QuizState::AwaitingAnswer(question),
            None => QuizState::NoQuestion,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, NewFlashcard};
    use crate::store::testing::{ManualClock, MemoryRepository, SequentialIds};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store(cards: &[(&str, &str, Language)]) -> CardStore {
        let clock = ManualClock::new();
        let mut store = CardStore::with_services(
            Box::new(MemoryRepository::default()),
            Box::new(clock.clone()),
            Box::new(SequentialIds::default()),
        );
        for (term, translation, language) in cards {
            clock.advance(1);
            store.add(NewFlashcard::new(*term, *translation, *language, Language::En));
        }
        store
    }

    fn wrong_option(question: &QuizQuestion) -> String {
        question
            .options
            .iter()
            .find(|option| **option != question.correct_answer)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_empty_store_has_no_question() {
        let store = store(&[]);
        let session = QuizSession::new(LanguageFilter::All, store.cards(), &mut StdRng::seed_from_u64(1));
        assert_eq!(session.state(), &QuizState::NoQuestion);
        assert!(session.question().is_none());
    }

    #[test]
    fn test_correct_answer_scores_and_records() {
        let mut store = store(&[("Hund", "dog", Language::De), ("gato", "cat", Language::Es)]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);

        let question = session.question().cloned().unwrap();
        assert_eq!(session.submit(&question.correct_answer, &mut store), Some(true));
        assert_eq!(session.score(), 1);

        let card = store.get(&question.flashcard.id).unwrap();
        assert_eq!(card.correct_count, 1);
        assert!(card.last_reviewed.is_some());
    }

    #[test]
    fn test_only_first_submission_counts() {
        let mut store = store(&[("Hund", "dog", Language::De), ("gato", "cat", Language::Es)]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);
        let question = session.question().cloned().unwrap();

        assert_eq!(session.submit(&wrong_option(&question), &mut store), Some(false));
        assert_eq!(session.submit(&question.correct_answer, &mut store), None);

        assert_eq!(session.score(), 0);
        assert_eq!(store.get(&question.flashcard.id).unwrap().correct_count, 0);
        assert!(matches!(
            session.state(),
            QuizState::Answered { correct: false, .. }
        ));
    }

    #[test]
    fn test_next_requires_answer() {
        let mut store = store(&[("Hund", "dog", Language::De), ("gato", "cat", Language::Es)]);
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);
        let before = session.state().clone();

        session.next(store.cards(), &mut rng);
        assert_eq!(session.state(), &before);

        let answer = session.question().unwrap().correct_answer.clone();
        session.submit(&answer, &mut store);
        session.next(store.cards(), &mut rng);
        assert!(matches!(session.state(), QuizState::AwaitingAnswer(_)));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_learning_last_card_exhausts_pool() {
        let mut store = store(&[("Hund", "dog", Language::De)]);
        let id = store.cards()[0].id.clone();
        for _ in 0..9 {
            store.record_answer(&id, true);
        }
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);

        assert_eq!(session.question().unwrap().options, vec!["dog".to_string()]);
        session.submit("dog", &mut store);
        assert!(store.get(&id).unwrap().is_learned);

        session.next(store.cards(), &mut rng);
        assert_eq!(session.state(), &QuizState::NoQuestion);
    }

    #[test]
    fn test_filter_change_resets_score() {
        let mut store = store(&[
            ("Hund", "dog", Language::De),
            ("Katze", "cat", Language::De),
            ("neko", "cat", Language::Ja),
        ]);
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);
        let answer = session.question().unwrap().correct_answer.clone();
        session.submit(&answer, &mut store);
        assert_eq!(session.score(), 1);

        session.set_filter(LanguageFilter::Only(Language::Ja), store.cards(), &mut rng);
        assert_eq!(session.score(), 0);
        assert_eq!(session.filter(), LanguageFilter::Only(Language::Ja));
        let question = session.question().unwrap();
        assert_eq!(question.flashcard.term, "neko");
        assert_eq!(question.options.len(), 1);

        session.set_filter(LanguageFilter::Only(Language::Fr), store.cards(), &mut rng);
        assert_eq!(session.state(), &QuizState::NoQuestion);
    }

    #[test]
    fn test_refresh_after_cards_added() {
        let mut store = store(&[]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);
        assert!(session.question().is_none());

        store.add(NewFlashcard::new("chien", "dog", Language::Fr, Language::En));
        session.refresh(store.cards(), &mut rng);
        assert_eq!(session.question().unwrap().flashcard.term, "chien");

        // An open question is left alone
        let before = session.state().clone();
        session.refresh(store.cards(), &mut rng);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_submit_without_question_is_ignored() {
        let mut store = store(&[]);
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);

        assert_eq!(session.submit("dog", &mut store), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.state(), &QuizState::NoQuestion);
        assert!(store.cards().is_empty());
    }

    #[test]
    fn test_next_retries_after_cards_added() {
        let mut store = store(&[]);
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);
        assert_eq!(session.state(), &QuizState::NoQuestion);

        store.add(NewFlashcard::new("perro", "dog", Language::Es, Language::En));
        session.next(store.cards(), &mut rng);

        let QuizState::AwaitingAnswer(question) = session.state() else {
            panic!("expected a question after cards were added");
        };
        assert_eq!(question.flashcard.term, "perro");
        assert_eq!(question.options, vec!["dog".to_string()]);
    }
}

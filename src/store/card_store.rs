//! In-memory card collection that writes itself back after every change.

use super::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::database::CardRepository;
use crate::models::{Flashcard, Language, LanguageFilter, NewFlashcard, UserStats};

/// Owns every card. All mutations go through here and end with a full save.
///
/// Unknown ids are ignored. Mutations report whether they found their card so that
/// callers can tell, but nothing breaks if the result is dropped.
pub struct CardStore {
    cards: Vec<Flashcard>,
    repository: Box<dyn CardRepository>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl CardStore {
    /// Loads the saved collection using the wall clock and UUID ids.
    pub fn open(repository: Box<dyn CardRepository>) -> Self {
        Self::with_services(repository, Box::new(SystemClock), Box::new(UuidGenerator))
    }

    /// Unreadable stored data starts an empty collection instead of failing.
    pub fn with_services(
        repository: Box<dyn CardRepository>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let cards = match repository.load() {
            Ok(cards) => {
                tracing::info!("Loaded {} flashcards", cards.len());
                cards
            }
            Err(e) => {
                tracing::warn!("Failed to load flashcards, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            cards,
            repository,
            clock,
            ids,
        }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn filtered(&self, filter: LanguageFilter) -> Vec<&Flashcard> {
        self.cards
            .iter()
            .filter(|card| filter.matches(card.source_language))
            .collect()
    }

    /// Distinct source languages, in the order they first appear.
    pub fn source_languages(&self) -> Vec<Language> {
        let mut languages = Vec::new();
        for card in &self.cards {
            if !languages.contains(&card.source_language) {
                languages.push(card.source_language);
            }
        }
        languages
    }

    pub fn stats(&self, filter: LanguageFilter) -> UserStats {
        UserStats::from_cards(self.filtered(filter))
    }

    /// Appends a new card with zero progress. Input is not validated here.
    pub fn add(&mut self, new_card: NewFlashcard) -> Flashcard {
        let card = new_card.into_flashcard(self.ids.new_id(), self.clock.now());
        tracing::debug!(card_id = %card.id, term = %card.term, "adding flashcard");

        self.cards.push(card.clone());
        self.persist();
        card
    }

    /// Replaces the card with the same id as-is.
    pub fn update(&mut self, card: Flashcard) -> bool {
        let Some(index) = self.position(&card.id) else {
            return false;
        };
        tracing::debug!(card_id = %card.id, "updating flashcard");

        self.cards[index] = card;
        self.persist();
        true
    }

    /// Removes the card if present. Saves even when nothing was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        let removed = self.cards.len() != before;
        tracing::debug!(card_id = %id, removed, "deleting flashcard");

        self.persist();
        removed
    }

    /// Applies one quiz answer to the card's learning progress.
    pub fn record_answer(&mut self, id: &str, correct: bool) -> Option<&Flashcard> {
        let index = self.position(id)?;
        let now = self.clock.now();

        let card = &mut self.cards[index];
        card.record_answer(correct, now);
        tracing::debug!(
            card_id = %id,
            correct,
            correct_count = card.correct_count,
            learned = card.is_learned,
            "recorded answer"
        );

        self.persist();
        self.cards.get(index)
    }

    pub fn toggle_learned(&mut self, id: &str) -> Option<&Flashcard> {
        let index = self.position(id)?;

        let card = &mut self.cards[index];
        card.toggle_learned();
        tracing::debug!(card_id = %id, learned = card.is_learned, "toggled learned status");

        self.persist();
        self.cards.get(index)
    }

    /// Appends imported cards whose ids are not in the collection yet.
    /// Returns how many were added.
    pub fn import(&mut self, cards: Vec<Flashcard>) -> usize {
        let mut added = 0;
        for card in cards {
            if self.position(&card.id).is_none() {
                self.cards.push(card);
                added += 1;
            }
        }

        if added > 0 {
            self.persist();
        }
        tracing::info!("Imported {} flashcards", added);
        added
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Full overwrite. A failed write is logged; the in-memory copy stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.cards) {
            tracing::warn!("Failed to save flashcards: {}", e);
        }
    }
}

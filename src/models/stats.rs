//! Progress summary over a set of cards.
use super::Flashcard;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total_cards: usize,
    pub mastered_cards: usize,
    pub cards_to_review: usize,
}

impl UserStats {
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Flashcard>) -> Self {
        cards.into_iter().fold(Self::default(), |mut stats, card| {
            stats.total_cards += 1;
            if card.is_learned {
                stats.mastered_cards += 1;
            } else {
                stats.cards_to_review += 1;
            }
            stats
        })
    }

    pub fn summary(&self) -> String {
        format!("{}/{} Learned", self.mastered_cards, self.total_cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, NewFlashcard};
    use chrono::Utc;

    #[test]
    fn test_counts_learned_and_pending() {
        let mut cards: Vec<Flashcard> = ["uno", "dos", "tres"]
            .iter()
            .enumerate()
            .map(|(i, term)| {
                NewFlashcard::new(*term, i.to_string(), Language::Es, Language::En)
                    .into_flashcard(term.to_string(), Utc::now())
            })
            .collect();
        cards[1].toggle_learned();

        let stats = UserStats::from_cards(&cards);
        assert_eq!(
            stats,
            UserStats {
                total_cards: 3,
                mastered_cards: 1,
                cards_to_review: 2,
            }
        );
        assert_eq!(stats.summary(), "1/3 Learned");
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(UserStats::from_cards(&Vec::<Flashcard>::new()), UserStats::default());
    }
}

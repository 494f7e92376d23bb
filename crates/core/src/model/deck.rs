use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::card::Flashcard;
use crate::model::text::{DeckTitle, Tag};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("this flashcard already exists in the deck")]
    DuplicateCard,

    #[error("card index {index} is out of range for a deck of {len} cards")]
    CardIndexOutOfRange { index: usize, len: usize },
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// An ordered, titled collection of flashcards.
///
/// Card order is stable: cards are only appended, replaced in place, or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeckRecord")]
pub struct Deck {
    title: DeckTitle,
    tags: BTreeSet<Tag>,
    cards: Vec<Flashcard>,
}

/// Stored form of a deck. Loading goes through `Deck::new` and `add_card`,
/// so repeated tags and questions keep only their first occurrence.
#[derive(Deserialize)]
struct DeckRecord {
    title: DeckTitle,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    cards: Vec<Flashcard>,
}

impl From<DeckRecord> for Deck {
    fn from(record: DeckRecord) -> Self {
        let mut deck = Deck::new(record.title, record.tags);
        for card in record.cards {
            let _ = deck.add_card(card);
        }
        deck
    }
}

impl Deck {
    /// Tags equal ignoring case are kept once, first spelling wins.
    #[must_use]
    pub fn new(title: DeckTitle, tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut unique = BTreeSet::new();
        for tag in tags {
            if !unique.iter().any(|t: &Tag| t.eq_ignore_case(&tag)) {
                unique.insert(tag);
            }
        }
        Self {
            title,
            tags: unique,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &DeckTitle {
        &self.title
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&Flashcard> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn with_title(mut self, title: DeckTitle) -> Self {
        self.title = title;
        self
    }

    /// Same deck when titles match ignoring case.
    #[must_use]
    pub fn is_same_deck(&self, other: &Deck) -> bool {
        self.title.eq_ignore_case(&other.title)
    }

    #[must_use]
    pub fn has_card(&self, card: &Flashcard) -> bool {
        self.cards.iter().any(|c| c.is_same_card(card))
    }

    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_case(tag))
    }

    /// Returns true if the title contains any of `keywords`, ignoring case.
    #[must_use]
    pub fn matches_keywords(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.title.contains_ignore_case(k))
    }

    /// Append a card.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::DuplicateCard` if an equivalent card exists.
    pub fn add_card(&mut self, card: Flashcard) -> Result<(), DeckError> {
        if self.has_card(&card) {
            return Err(DeckError::DuplicateCard);
        }
        self.cards.push(card);
        Ok(())
    }

    /// Replace the card at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::CardIndexOutOfRange` for a bad index and
    /// `DeckError::DuplicateCard` if the edit collides with another card.
    pub fn set_card(&mut self, index: usize, card: Flashcard) -> Result<(), DeckError> {
        let len = self.cards.len();
        if index >= len {
            return Err(DeckError::CardIndexOutOfRange { index, len });
        }
        let collides = self
            .cards
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.is_same_card(&card));
        if collides {
            return Err(DeckError::DuplicateCard);
        }
        self.cards[index] = card;
        Ok(())
    }

    /// Remove and return the card at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::CardIndexOutOfRange` for a bad index.
    pub fn remove_card(&mut self, index: usize) -> Result<Flashcard, DeckError> {
        let len = self.cards.len();
        if index >= len {
            return Err(DeckError::CardIndexOutOfRange { index, len });
        }
        Ok(self.cards.remove(index))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_deck(title: &str) -> Deck {
        Deck::new(
            DeckTitle::parse(title).unwrap(),
            [Tag::parse("geo").unwrap()],
        )
    }

    fn card(q: &str, a: &str) -> Flashcard {
        Flashcard::from_text(q, a).unwrap()
    }

    #[test]
    fn tags_differing_only_in_case_are_kept_once() {
        let deck = Deck::new(
            DeckTitle::parse("Rivers").unwrap(),
            ["geo", "GEO", "water"].map(|t| Tag::parse(t).unwrap()),
        );
        let tags: Vec<&str> = deck.tags().iter().map(Tag::as_str).collect();
        assert_eq!(tags, ["geo", "water"]);
    }

    #[test]
    fn deserializing_drops_repeated_questions_and_tags() {
        let raw = r#"{
            "title": "Quiz",
            "tags": ["geo", "Geo"],
            "cards": [
                {"question": "Q", "answer": "1"},
                {"question": "q", "answer": "2"},
                {"question": "R", "answer": "3"}
            ]
        }"#;
        let deck: Deck = serde_json::from_str(raw).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.card_at(0).unwrap().answer().as_str(), "1");
        assert_eq!(deck.card_at(1).unwrap().question().as_str(), "R");
        assert_eq!(deck.tags().len(), 1);
    }

    #[test]
    fn add_card_keeps_order_and_rejects_duplicates() {
        let mut deck = build_deck("Capitals");
        deck.add_card(card("France?", "Paris")).unwrap();
        deck.add_card(card("Spain?", "Madrid")).unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.card_at(1).unwrap().answer().as_str(), "Madrid");

        let err = deck.add_card(card("france?", "Lyon")).unwrap_err();
        assert_eq!(err, DeckError::DuplicateCard);
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn set_card_allows_editing_own_answer() {
        let mut deck = build_deck("Capitals");
        deck.add_card(card("France?", "Lyon")).unwrap();
        deck.set_card(0, card("France?", "Paris")).unwrap();
        assert_eq!(deck.card_at(0).unwrap().answer().as_str(), "Paris");
    }

    #[test]
    fn set_card_rejects_collision_and_bad_index() {
        let mut deck = build_deck("Capitals");
        deck.add_card(card("France?", "Paris")).unwrap();
        deck.add_card(card("Spain?", "Madrid")).unwrap();

        assert_eq!(
            deck.set_card(1, card("France?", "x")),
            Err(DeckError::DuplicateCard)
        );
        assert_eq!(
            deck.set_card(5, card("Italy?", "Rome")),
            Err(DeckError::CardIndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn remove_card_shifts_following_cards() {
        let mut deck = build_deck("Capitals");
        deck.add_card(card("France?", "Paris")).unwrap();
        deck.add_card(card("Spain?", "Madrid")).unwrap();

        let removed = deck.remove_card(0).unwrap();
        assert_eq!(removed.question().as_str(), "France?");
        assert_eq!(deck.card_at(0).unwrap().question().as_str(), "Spain?");
        assert!(deck.remove_card(3).is_err());
    }

    #[test]
    fn tags_and_keywords_ignore_case() {
        let deck = build_deck("World Capitals");
        assert!(deck.has_tag(&Tag::parse("GEO").unwrap()));
        assert!(!deck.has_tag(&Tag::parse("math").unwrap()));
        assert!(deck.matches_keywords(&["rivers".into(), "capitals".into()]));
        assert!(!deck.matches_keywords(&["rivers".into()]));
    }
}

use flashdeck_core::model::{Deck, Index};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("the deck index provided is invalid: {index}")]
    DeckNotFound { index: Index },

    #[error("a deck with this title already exists")]
    DuplicateDeck,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Ordered deck store.
///
/// Deck order is stable across calls; indices shift only when a deck is removed.
pub trait DeckRepository {
    fn decks(&self) -> &[Deck];

    fn decks_count(&self) -> usize {
        self.decks().len()
    }

    /// Fetch the deck at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DeckNotFound` if the index is out of range.
    fn deck_at(&self, index: Index) -> Result<&Deck, StorageError> {
        self.decks()
            .get(index.zero_based())
            .ok_or(StorageError::DeckNotFound { index })
    }

    /// Returns true if a deck with the same title is stored.
    fn has_deck(&self, deck: &Deck) -> bool {
        self.decks().iter().any(|d| d.is_same_deck(deck))
    }

    /// Append a deck and return its index.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DuplicateDeck` if the title is taken.
    fn add_deck(&mut self, deck: Deck) -> Result<Index, StorageError>;

    /// Replace the deck at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DeckNotFound` for a bad index and
    /// `StorageError::DuplicateDeck` if the new title collides with another deck.
    fn set_deck(&mut self, index: Index, deck: Deck) -> Result<(), StorageError>;

    /// Remove and return the deck at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DeckNotFound` for a bad index.
    fn remove_deck(&mut self, index: Index) -> Result<Deck, StorageError>;

    fn clear(&mut self);
}

/// Vec-backed repository used by the app and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    decks: Vec<Deck>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self { decks: Vec::new() }
    }

    /// Build a repository from previously stored decks.
    ///
    /// Later decks whose title repeats an earlier one are dropped.
    #[must_use]
    pub fn from_decks(decks: impl IntoIterator<Item = Deck>) -> Self {
        let mut repo = Self::new();
        for deck in decks {
            if let Err(err) = repo.add_deck(deck) {
                log::warn!("skipping stored deck: {err}");
            }
        }
        repo
    }
}

impl DeckRepository for InMemoryRepository {
    fn decks(&self) -> &[Deck] {
        &self.decks
    }

    fn add_deck(&mut self, deck: Deck) -> Result<Index, StorageError> {
        if self.has_deck(&deck) {
            return Err(StorageError::DuplicateDeck);
        }
        self.decks.push(deck);
        Ok(Index::from_zero_based(self.decks.len() - 1))
    }

    fn set_deck(&mut self, index: Index, deck: Deck) -> Result<(), StorageError> {
        let position = index.zero_based();
        if position >= self.decks.len() {
            return Err(StorageError::DeckNotFound { index });
        }
        let collides = self
            .decks
            .iter()
            .enumerate()
            .any(|(i, d)| i != position && d.is_same_deck(&deck));
        if collides {
            return Err(StorageError::DuplicateDeck);
        }
        self.decks[position] = deck;
        Ok(())
    }

    fn remove_deck(&mut self, index: Index) -> Result<Deck, StorageError> {
        let position = index.zero_based();
        if position >= self.decks.len() {
            return Err(StorageError::DeckNotFound { index });
        }
        Ok(self.decks.remove(position))
    }

    fn clear(&mut self) {
        self.decks.clear();
    }
}

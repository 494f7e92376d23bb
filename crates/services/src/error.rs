//! Shared error types for the services crate.

use thiserror::Error;

use flashdeck_core::model::{DeckError, Index, TestSessionError};
use storage::StorageError;

use crate::parser::ParseError;

/// Errors emitted by `CommandExecutor`.
///
/// The store and the test session are unchanged when one is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    #[error(transparent)]
    Session(#[from] TestSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("no deck is open, use `open INDEX` first")]
    NoOpenDeck,
    #[error("the flashcard index provided is invalid: {index}")]
    InvalidCardIndex { index: Index },
    #[error("the {field} cannot be edited here")]
    EditFieldNotApplicable { field: &'static str },
    #[error("a test session is in progress, finish it or `quit` first")]
    TestInProgress,
}

/// Errors emitted by `Logic::run`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogicError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

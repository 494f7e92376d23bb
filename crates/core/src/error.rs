use thiserror::Error;

use crate::model::{CardError, DeckError, ParseIndexError, TestSessionError, TextError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Index(#[from] ParseIndexError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Session(#[from] TestSessionError),
}

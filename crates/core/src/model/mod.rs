mod card;
mod deck;
mod index;
mod session;
pub mod text;

pub use text::{Answer, DeckTitle, Question, Tag, Text, TextError, TextKind};

pub use card::{CardError, Flashcard};
pub use deck::{Deck, DeckError};
pub use index::{Index, ParseIndexError};
pub use session::{SessionState, TestSession, TestSessionError, TestSummary, Verdict, answers_match};

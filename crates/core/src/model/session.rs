use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::card::Flashcard;
use crate::model::deck::Deck;
use crate::model::text::{DeckTitle, Question};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Protocol violations of a test session.
///
/// Every variant is recoverable; the session is left untouched when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestSessionError {
    #[error("the deck has no flashcards to test")]
    EmptyDeck,

    #[error("there is no ongoing test session")]
    NoOngoingTest,

    #[error("the current question has not been answered yet")]
    UnansweredQuestion,

    #[error("the current question has already been answered")]
    AlreadyAnswered,

    #[error("the answer is already marked as correct")]
    AlreadyCorrect,

    #[error("the test session is complete")]
    TestComplete,
}

//
// ─── VERDICT / STATE ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => f.write_str("Correct"),
            Verdict::Incorrect => f.write_str("Incorrect"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer,
    Answered,
    Complete,
}

/// Compares a submitted answer with the canonical one.
///
/// Exact match after trimming and lowercasing; no partial credit.
#[must_use]
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Outcome of a test session at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSummary {
    pub deck_title: DeckTitle,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TestSummary {
    /// Percentage of finalized cards that were correct, 0 when none were.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_percent(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f64 * 100.0 / self.answered as f64
    }

    /// Time spent in the session; open sessions are measured up to `now`.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.completed_at.unwrap_or(now) - self.started_at
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run over a snapshot of a deck.
///
/// Cards are asked in deck order. Each card must be answered before advancing,
/// and an incorrect verdict can be forced to correct once before advancing.
#[derive(Debug, Clone)]
pub struct TestSession {
    deck: Deck,
    card_index: usize,
    current_question: Option<Question>,
    state: SessionState,
    last_result: Option<Verdict>,
    results: Vec<Verdict>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TestSession {
    /// Start a session on `deck`, asking its first card.
    ///
    /// # Errors
    ///
    /// Returns `TestSessionError::EmptyDeck` if the deck has no cards.
    pub fn start(deck: Deck, started_at: DateTime<Utc>) -> Result<Self, TestSessionError> {
        let first = deck
            .card_at(0)
            .map(|card| card.question().clone())
            .ok_or(TestSessionError::EmptyDeck)?;

        Ok(Self {
            deck,
            card_index: 0,
            current_question: Some(first),
            state: SessionState::AwaitingAnswer,
            last_result: None,
            results: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn card_index(&self) -> usize {
        self.card_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        if self.is_complete() {
            return None;
        }
        self.deck.card_at(self.card_index)
    }

    #[must_use]
    pub fn last_result(&self) -> Option<Verdict> {
        self.last_result
    }

    #[must_use]
    pub fn results(&self) -> &[Verdict] {
        &self.results
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.state == SessionState::Answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Number of cards not yet advanced past, including the current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.card_index)
    }

    /// Check `text` against the current card's answer.
    ///
    /// # Errors
    ///
    /// Returns `TestSessionError::AlreadyAnswered` if the current card was answered,
    /// or `TestSessionError::TestComplete` once every card has been asked.
    pub fn submit_answer(&mut self, text: &str) -> Result<Verdict, TestSessionError> {
        match self.state {
            SessionState::AwaitingAnswer => {}
            SessionState::Answered => return Err(TestSessionError::AlreadyAnswered),
            SessionState::Complete => return Err(TestSessionError::TestComplete),
        }
        let card = self
            .deck
            .card_at(self.card_index)
            .ok_or(TestSessionError::TestComplete)?;

        let verdict = if answers_match(text, card.answer().as_str()) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        self.last_result = Some(verdict);
        self.state = SessionState::Answered;
        Ok(verdict)
    }

    /// Override an incorrect verdict on the current card.
    ///
    /// # Errors
    ///
    /// Returns `TestSessionError::UnansweredQuestion` before an answer was submitted,
    /// `TestSessionError::AlreadyCorrect` if the verdict is already correct,
    /// or `TestSessionError::TestComplete` once the session is over.
    pub fn force_correct(&mut self) -> Result<(), TestSessionError> {
        match self.state {
            SessionState::AwaitingAnswer => Err(TestSessionError::UnansweredQuestion),
            SessionState::Complete => Err(TestSessionError::TestComplete),
            SessionState::Answered => match self.last_result {
                Some(Verdict::Correct) => Err(TestSessionError::AlreadyCorrect),
                Some(Verdict::Incorrect) => {
                    self.last_result = Some(Verdict::Correct);
                    Ok(())
                }
                None => Err(TestSessionError::UnansweredQuestion),
            },
        }
    }

    /// Record the current verdict and move to the next card.
    ///
    /// Returns the next question, or `None` when the last card was just finalized
    /// and the session became complete.
    ///
    /// # Errors
    ///
    /// Returns `TestSessionError::UnansweredQuestion` if the current card has no answer
    /// yet, or `TestSessionError::TestComplete` if the session is already over.
    pub fn next_question(
        &mut self,
        at: DateTime<Utc>,
    ) -> Result<Option<&Question>, TestSessionError> {
        match self.state {
            SessionState::Answered => {}
            SessionState::AwaitingAnswer => return Err(TestSessionError::UnansweredQuestion),
            SessionState::Complete => return Err(TestSessionError::TestComplete),
        }
        let verdict = self
            .last_result
            .ok_or(TestSessionError::UnansweredQuestion)?;

        self.results.push(verdict);
        self.last_result = None;
        self.card_index += 1;

        match self.deck.card_at(self.card_index) {
            Some(card) => {
                self.current_question = Some(card.question().clone());
                self.state = SessionState::AwaitingAnswer;
            }
            None => {
                self.current_question = None;
                self.state = SessionState::Complete;
                self.completed_at = Some(at);
            }
        }

        Ok(self.current_question.as_ref())
    }

    #[must_use]
    pub fn summary(&self) -> TestSummary {
        TestSummary {
            deck_title: self.deck.title().clone(),
            total: self.deck.len(),
            answered: self.results.len(),
            correct: self.results.iter().filter(|v| v.is_correct()).count(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

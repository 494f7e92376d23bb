use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::text::{Answer, Question, TextError};

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("invalid question: {0}")]
    InvalidQuestion(#[source] TextError),

    #[error("invalid answer: {0}")]
    InvalidAnswer(#[source] TextError),
}

/// A question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    question: Question,
    answer: Answer,
}

impl Flashcard {
    #[must_use]
    pub fn new(question: Question, answer: Answer) -> Self {
        Self { question, answer }
    }

    /// Builds a card from raw strings.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if either side is blank.
    pub fn from_text(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, CardError> {
        let question = Question::parse(question).map_err(CardError::InvalidQuestion)?;
        let answer = Answer::parse(answer).map_err(CardError::InvalidAnswer)?;
        Ok(Self { question, answer })
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    #[must_use]
    pub fn with_question(mut self, question: Question) -> Self {
        self.question = question;
        self
    }

    #[must_use]
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answer = answer;
        self
    }

    /// Two cards are the same card when their questions match ignoring case.
    #[must_use]
    pub fn is_same_card(&self, other: &Flashcard) -> bool {
        self.question.eq_ignore_case(&other.question)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_fails_if_question_empty() {
        let err = Flashcard::from_text("   ", "ok").unwrap_err();
        assert!(matches!(err, CardError::InvalidQuestion(_)));
    }

    #[test]
    fn card_fails_if_answer_empty() {
        let err = Flashcard::from_text("ok", " ").unwrap_err();
        assert!(matches!(err, CardError::InvalidAnswer(_)));
    }

    #[test]
    fn same_card_ignores_case_and_answer() {
        let a = Flashcard::from_text("Capital of France?", "Paris").unwrap();
        let b = Flashcard::from_text("capital of france?", "paris, France").unwrap();
        let c = Flashcard::from_text("Capital of Spain?", "Madrid").unwrap();
        assert!(a.is_same_card(&b));
        assert!(!a.is_same_card(&c));
    }

    #[test]
    fn with_answer_keeps_question() {
        let card = Flashcard::from_text("2+2?", "5").unwrap();
        let fixed = card.with_answer(Answer::parse("4").unwrap());
        assert_eq!(fixed.question().as_str(), "2+2?");
        assert_eq!(fixed.answer().as_str(), "4");
    }
}

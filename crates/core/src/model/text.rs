use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("tag must be a single alphanumeric word: {raw:?}")]
    InvalidTag { raw: String },
}

/// Marker trait describing what a [`Text`] holds and how it is validated.
pub trait TextKind {
    /// Field name used in validation messages.
    const FIELD: &'static str;

    /// Validates an already-trimmed value.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input.
    fn check(value: &str) -> Result<(), TextError> {
        if value.is_empty() {
            return Err(TextError::Empty { field: Self::FIELD });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnswerKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TitleKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKind {}

impl TextKind for QuestionKind {
    const FIELD: &'static str = "question";
}

impl TextKind for AnswerKind {
    const FIELD: &'static str = "answer";
}

impl TextKind for TitleKind {
    const FIELD: &'static str = "deck title";
}

impl TextKind for TagKind {
    const FIELD: &'static str = "tag";

    fn check(value: &str) -> Result<(), TextError> {
        if value.is_empty() {
            return Err(TextError::Empty { field: Self::FIELD });
        }
        if !value.chars().all(char::is_alphanumeric) {
            return Err(TextError::InvalidTag {
                raw: value.to_owned(),
            });
        }
        Ok(())
    }
}

/// Trimmed, validated text tagged with the role it plays.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text<T>(String, PhantomData<T>);

pub type Question = Text<QuestionKind>;
pub type Answer = Text<AnswerKind>;
pub type DeckTitle = Text<TitleKind>;
pub type Tag = Text<TagKind>;

impl<T: TextKind> Text<T> {
    /// Trims and validates `s`.
    ///
    /// # Errors
    ///
    /// Returns `TextError` if the trimmed value fails the kind's check.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        let trimmed = s.trim();
        T::check(trimmed)?;
        Ok(Self(trimmed.to_owned(), PhantomData))
    }
}

impl<T> Text<T> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality, used for card and deck identity.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    /// Returns true if the text contains `keyword`, ignoring case.
    #[must_use]
    pub fn contains_ignore_case(&self, keyword: &str) -> bool {
        self.0.to_lowercase().contains(&keyword.to_lowercase())
    }
}

impl<T> fmt::Display for Text<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T> Serialize for Text<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T: TextKind> Deserialize<'de> for Text<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

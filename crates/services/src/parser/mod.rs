//! Turns raw input lines into validated [`Command`]s.
//!
//! A line is split into a command word and the untrimmed remainder. The word
//! selects an argument parser from a registration table; the argument parser
//! either builds the command or fails with the command's usage.

pub mod args;
mod grammar;

use std::collections::HashMap;
use thiserror::Error;

use crate::commands::{Command, CommandKind};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid command format!\n{}", kind.usage())]
    InvalidFormat { kind: CommandKind },

    #[error("{message}\n{}", kind.usage())]
    InvalidArgument {
        kind: CommandKind,
        message: String,
    },

    #[error("Unknown command")]
    UnknownCommand,
}

impl ParseError {
    pub(crate) fn format(kind: CommandKind) -> Self {
        Self::InvalidFormat { kind }
    }

    pub(crate) fn argument(kind: CommandKind, message: impl ToString) -> Self {
        Self::InvalidArgument {
            kind,
            message: message.to_string(),
        }
    }

    /// The command whose grammar was violated, if one was recognised.
    #[must_use]
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            ParseError::InvalidFormat { kind } | ParseError::InvalidArgument { kind, .. } => {
                Some(*kind)
            }
            ParseError::UnknownCommand => None,
        }
    }
}

//
// ─── PARSER ────────────────────────────────────────────────────────────────────
//

/// Parses the text following a command word.
pub type ArgumentParser = fn(&str) -> Result<Command, ParseError>;

/// Splits trimmed input into its leading non-whitespace run and the rest.
///
/// Returns `None` for blank input.
#[must_use]
pub fn split_command_word(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .find(char::is_whitespace)
            .map_or((trimmed, ""), |at| trimmed.split_at(at)),
    )
}

/// Command word → argument parser registration table.
#[derive(Clone)]
pub struct CommandParser {
    table: HashMap<&'static str, ArgumentParser>,
}

impl CommandParser {
    /// A parser with every built-in command registered.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = Self {
            table: HashMap::new(),
        };
        parser.register(CommandKind::Add, grammar::parse_add);
        parser.register(CommandKind::Edit, grammar::parse_edit);
        parser.register(CommandKind::Delete, |args| {
            grammar::parse_index(CommandKind::Delete, args).map(|index| Command::Delete { index })
        });
        parser.register(CommandKind::List, |_| Ok(Command::List));
        parser.register(CommandKind::Filter, grammar::parse_filter);
        parser.register(CommandKind::Search, grammar::parse_search);
        parser.register(CommandKind::Open, |args| {
            grammar::parse_index(CommandKind::Open, args).map(|index| Command::Open { index })
        });
        parser.register(CommandKind::Test, |args| {
            grammar::parse_index(CommandKind::Test, args).map(|index| Command::Test { index })
        });
        parser.register(CommandKind::Answer, grammar::parse_answer);
        parser.register(CommandKind::Next, |_| Ok(Command::Next));
        parser.register(CommandKind::Force, |_| Ok(Command::Force));
        parser.register(CommandKind::Quit, |_| Ok(Command::Quit));
        parser.register(CommandKind::Clear, |_| Ok(Command::Clear));
        parser.register(CommandKind::Statistics, grammar::parse_statistics);
        parser.register(CommandKind::Help, |_| Ok(Command::Help));
        parser.register(CommandKind::Exit, |_| Ok(Command::Exit));
        parser
    }

    /// Register (or replace) the argument parser for `kind`'s command word.
    pub fn register(&mut self, kind: CommandKind, parser: ArgumentParser) -> Option<ArgumentParser> {
        self.table.insert(kind.word(), parser)
    }

    /// Parse one line of user input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` for blank input or malformed arguments,
    /// `ParseError::InvalidArgument` when an argument fails validation, and
    /// `ParseError::UnknownCommand` for an unregistered command word.
    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        let (command_word, arguments) =
            split_command_word(input).ok_or(ParseError::format(CommandKind::Help))?;

        let parse_arguments = self
            .table
            .get(command_word)
            .ok_or(ParseError::UnknownCommand)?;

        parse_arguments(arguments)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut words: Vec<_> = self.table.keys().collect();
        words.sort();
        f.debug_struct("CommandParser")
            .field("words", &words)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

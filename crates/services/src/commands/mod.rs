//! The closed set of commands a user can type.

mod result;

pub use result::{CommandResult, Listed, View};

use flashdeck_core::model::{Answer, DeckTitle, Flashcard, Index, Question, Tag};
use std::fmt;

//
// ─── COMMAND KINDS ─────────────────────────────────────────────────────────────
//

/// Identifies a command independently of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Add,
    Edit,
    Delete,
    List,
    Filter,
    Search,
    SearchDeck,
    SearchCard,
    Open,
    Test,
    Answer,
    Next,
    Force,
    Quit,
    Clear,
    Statistics,
    Help,
    Exit,
}

impl CommandKind {
    /// Every kind, in the order help lists them.
    pub const ALL: [CommandKind; 18] = [
        CommandKind::Add,
        CommandKind::Edit,
        CommandKind::Delete,
        CommandKind::List,
        CommandKind::Open,
        CommandKind::Filter,
        CommandKind::Search,
        CommandKind::SearchDeck,
        CommandKind::SearchCard,
        CommandKind::Test,
        CommandKind::Answer,
        CommandKind::Next,
        CommandKind::Force,
        CommandKind::Quit,
        CommandKind::Statistics,
        CommandKind::Clear,
        CommandKind::Help,
        CommandKind::Exit,
    ];

    /// The text typed to invoke the command.
    #[must_use]
    pub fn word(self) -> &'static str {
        match self {
            CommandKind::Add => "add",
            CommandKind::Edit => "edit",
            CommandKind::Delete => "delete",
            CommandKind::List => "list",
            CommandKind::Filter => "filter",
            CommandKind::Search => "search",
            CommandKind::SearchDeck => "search deck",
            CommandKind::SearchCard => "search card",
            CommandKind::Open => "open",
            CommandKind::Test => "test",
            CommandKind::Answer => "answer",
            CommandKind::Next => "next",
            CommandKind::Force => "force",
            CommandKind::Quit => "quit",
            CommandKind::Clear => "clear",
            CommandKind::Statistics => "statistics",
            CommandKind::Help => "help",
            CommandKind::Exit => "exit",
        }
    }

    #[must_use]
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Add => {
                "add: Adds a deck, or a flashcard to a deck.\n\
                 Parameters: t/TITLE [g/TAG]...  or  d/DECK_INDEX q/QUESTION a/ANSWER\n\
                 Example: add t/Capitals g/geography\n\
                 Example: add d/1 q/Capital of France? a/Paris"
            }
            CommandKind::Edit => {
                "edit: Edits the deck at INDEX, or the flashcard at INDEX of the open deck.\n\
                 Parameters: INDEX [t/TITLE] [q/QUESTION] [a/ANSWER]\n\
                 Example: edit 1 t/European Capitals"
            }
            CommandKind::Delete => {
                "delete: Deletes the deck at INDEX, or the flashcard at INDEX of the open deck.\n\
                 Parameters: INDEX (must be a positive integer)\n\
                 Example: delete 1"
            }
            CommandKind::List => "list: Closes the open deck and lists all decks.",
            CommandKind::Filter => {
                "filter: Lists decks carrying any of the given tags.\n\
                 Parameters: TAG [TAG]...\n\
                 Example: filter geography history"
            }
            CommandKind::Search => {
                "search: Searches decks or the flashcards of the open deck.\n\
                 Parameters: deck KEYWORD [KEYWORD]...  or  card KEYWORD [KEYWORD]...\n\
                 Example: search deck capitals"
            }
            CommandKind::SearchDeck => {
                "search deck: Lists decks whose title contains any of the keywords.\n\
                 Parameters: KEYWORD [KEYWORD]...\n\
                 Example: search deck capitals"
            }
            CommandKind::SearchCard => {
                "search card: Lists flashcards of the open deck whose question contains any of the keywords.\n\
                 Parameters: KEYWORD [KEYWORD]...\n\
                 Example: search card france"
            }
            CommandKind::Open => {
                "open: Opens the deck at INDEX and lists its flashcards.\n\
                 Parameters: INDEX (must be a positive integer)\n\
                 Example: open 1"
            }
            CommandKind::Test => {
                "test: Starts a test session on the deck at INDEX.\n\
                 Parameters: INDEX (must be a positive integer)\n\
                 Example: test 1"
            }
            CommandKind::Answer => {
                "answer: Submits an answer to the current question.\n\
                 Parameters: ANSWER\n\
                 Example: answer Paris"
            }
            CommandKind::Next => "next: Moves to the next question of the test session.",
            CommandKind::Force => "force: Marks the last wrong answer as correct.",
            CommandKind::Quit => "quit: Ends the current test session.",
            CommandKind::Clear => "clear: Deletes every deck and all statistics.",
            CommandKind::Statistics => {
                "statistics: Shows test statistics, overall or for the deck at INDEX.\n\
                 Parameters: [INDEX]\n\
                 Example: statistics 1"
            }
            CommandKind::Help => "help: Shows the usage of every command.",
            CommandKind::Exit => "exit: Saves and exits the program.",
        }
    }

    /// Commands that may run while a test session is live.
    #[must_use]
    pub fn allowed_during_test(self) -> bool {
        matches!(
            self,
            CommandKind::Test
                | CommandKind::Answer
                | CommandKind::Next
                | CommandKind::Force
                | CommandKind::Quit
                | CommandKind::Statistics
                | CommandKind::Help
                | CommandKind::Exit
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Usage of every command, one block per command.
#[must_use]
pub fn help_text() -> String {
    CommandKind::ALL
        .iter()
        .filter(|kind| **kind != CommandKind::Search)
        .map(|kind| kind.usage())
        .collect::<Vec<_>>()
        .join("\n\n")
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTarget {
    Deck { title: DeckTitle, tags: Vec<Tag> },
    Card { deck: Index, card: Flashcard },
}

/// Fields supplied to `edit`; at least one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditChanges {
    pub title: Option<DeckTitle>,
    pub question: Option<Question>,
    pub answer: Option<Answer>,
}

impl EditChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.question.is_none() && self.answer.is_none()
    }
}

/// A fully validated command, ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddTarget),
    Edit { index: Index, changes: EditChanges },
    Delete { index: Index },
    List,
    Filter { tags: Vec<Tag> },
    SearchDeck { keywords: Vec<String> },
    SearchCard { keywords: Vec<String> },
    Open { index: Index },
    Test { index: Index },
    Answer { text: String },
    Next,
    Force,
    Quit,
    Clear,
    Statistics { index: Option<Index> },
    Help,
    Exit,
}

impl Command {
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Add(_) => CommandKind::Add,
            Command::Edit { .. } => CommandKind::Edit,
            Command::Delete { .. } => CommandKind::Delete,
            Command::List => CommandKind::List,
            Command::Filter { .. } => CommandKind::Filter,
            Command::SearchDeck { .. } => CommandKind::SearchDeck,
            Command::SearchCard { .. } => CommandKind::SearchCard,
            Command::Open { .. } => CommandKind::Open,
            Command::Test { .. } => CommandKind::Test,
            Command::Answer { .. } => CommandKind::Answer,
            Command::Next => CommandKind::Next,
            Command::Force => CommandKind::Force,
            Command::Quit => CommandKind::Quit,
            Command::Clear => CommandKind::Clear,
            Command::Statistics { .. } => CommandKind::Statistics,
            Command::Help => CommandKind::Help,
            Command::Exit => CommandKind::Exit,
        }
    }
}

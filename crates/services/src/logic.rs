use flashdeck_core::Clock;
use flashdeck_core::model::Deck;
use storage::DeckRepository;

use crate::commands::CommandResult;
use crate::error::LogicError;
use crate::executor::CommandExecutor;
use crate::history::CommandHistory;
use crate::parser::CommandParser;

/// Entry point for a front end: one input line in, one result out.
#[derive(Debug)]
pub struct Logic {
    parser: CommandParser,
    executor: CommandExecutor,
    history: CommandHistory,
}

impl Logic {
    #[must_use]
    pub fn new(repository: Box<dyn DeckRepository>, clock: Clock) -> Self {
        Self {
            parser: CommandParser::new(),
            executor: CommandExecutor::new(repository, clock),
            history: CommandHistory::new(),
        }
    }

    /// Parse and execute `line`, recording it in the history on success.
    ///
    /// # Errors
    ///
    /// Returns `LogicError::Parse` for malformed input and
    /// `LogicError::Command` when execution fails.
    pub fn run(&mut self, line: &str) -> Result<CommandResult, LogicError> {
        let command = self.parser.parse(line)?;
        let result = self.executor.execute(command)?;
        self.history.add(line.trim());
        Ok(result)
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    #[must_use]
    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut CommandExecutor {
        &mut self.executor
    }

    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        self.executor.decks()
    }
}

#![forbid(unsafe_code)]

pub mod commands;
pub mod error;
pub mod executor;
pub mod history;
pub mod logic;
pub mod parser;
pub mod statistics;

pub use flashdeck_core::Clock;

pub use commands::{Command, CommandKind, CommandResult, Listed, View};
pub use error::{CommandError, LogicError};
pub use executor::CommandExecutor;
pub use history::{CommandHistory, HistoryError};
pub use logic::Logic;
pub use parser::{CommandParser, ParseError};
pub use statistics::{DeckStatistics, StatisticsLog, TestRecord};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("command is not in the history: {0:?}")]
    NotFound(String),
}

/// Ordered log of executed command lines. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: impl Into<String>) {
        self.entries.push(command.into());
    }

    /// Remove the earliest entry equal to `command`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NotFound` if no entry matches.
    pub fn remove(&mut self, command: &str) -> Result<(), HistoryError> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry == command)
            .ok_or_else(|| HistoryError::NotFound(command.to_owned()))?;
        self.entries.remove(position);
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut history = CommandHistory::new();
        history.add("list");
        history.add("open 1");
        history.add("list");
        assert_eq!(history.entries(), ["list", "open 1", "list"]);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut history = CommandHistory::new();
        history.add("list");
        history.add("open 1");
        history.add("list");
        history.remove("list").unwrap();
        assert_eq!(history.entries(), ["open 1", "list"]);
    }

    #[test]
    fn removing_missing_entry_fails() {
        let mut history = CommandHistory::new();
        history.add("list");
        let err = history.remove("exit").unwrap_err();
        assert_eq!(err, HistoryError::NotFound("exit".into()));
        assert_eq!(history.len(), 1);
    }
}

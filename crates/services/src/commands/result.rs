use flashdeck_core::model::Index;

/// One row of a deck or card listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listed {
    pub index: Index,
    pub label: String,
}

/// What the caller should display after a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Unchanged,
    Decks(Vec<Listed>),
    Cards(Vec<Listed>),
    Question {
        text: String,
        position: usize,
        total: usize,
    },
}

/// Outcome of a successfully executed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub view: View,
    pub show_help: bool,
    pub exit: bool,
    /// Set when the deck store changed and should be persisted.
    pub modified: bool,
}

impl CommandResult {
    #[must_use]
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    #[must_use]
    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }

    #[must_use]
    pub fn help(feedback: impl Into<String>) -> Self {
        Self {
            show_help: true,
            ..Self::new(feedback)
        }
    }

    #[must_use]
    pub fn exit(feedback: impl Into<String>) -> Self {
        Self {
            exit: true,
            ..Self::new(feedback)
        }
    }
}

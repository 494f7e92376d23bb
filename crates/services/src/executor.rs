//! Applies parsed commands to the deck store and the live test session.

use std::fmt;

use flashdeck_core::Clock;
use flashdeck_core::model::{Deck, DeckTitle, Flashcard, Index, Tag, TestSession, TestSessionError, Verdict};
use storage::DeckRepository;

use crate::commands::{AddTarget, Command, CommandResult, EditChanges, Listed, View, help_text};
use crate::error::CommandError;
use crate::statistics::{DeckStatistics, StatisticsLog};

/// Owns the deck store, the open deck, the session slot and the statistics log.
///
/// A failed command leaves every piece of state as it was: deck edits are made
/// on a copy and written back only once they validate.
pub struct CommandExecutor {
    repository: Box<dyn DeckRepository>,
    session: Option<TestSession>,
    open_deck: Option<Index>,
    statistics: StatisticsLog,
    clock: Clock,
}

impl CommandExecutor {
    #[must_use]
    pub fn new(repository: Box<dyn DeckRepository>, clock: Clock) -> Self {
        Self {
            repository,
            session: None,
            open_deck: None,
            statistics: StatisticsLog::new(),
            clock,
        }
    }

    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        self.repository.decks()
    }

    #[must_use]
    pub fn test_session(&self) -> Option<&TestSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn open_deck(&self) -> Option<Index> {
        self.open_deck
    }

    #[must_use]
    pub fn statistics(&self) -> &StatisticsLog {
        &self.statistics
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Start a test on the deck at `index`, replacing any live session.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Storage` for a bad index and
    /// `CommandError::Session(EmptyDeck)` for a deck without cards. The
    /// previous session survives either failure.
    pub fn test_deck(&mut self, index: Index) -> Result<&TestSession, CommandError> {
        let deck = self.repository.deck_at(index)?.clone();
        let session = TestSession::start(deck, self.clock.now())?;
        if let Some(previous) = self.session.replace(session) {
            log::info!(
                "test on {} abandoned for a new test",
                previous.deck().title()
            );
        }
        self.session
            .as_ref()
            .ok_or(CommandError::Session(TestSessionError::NoOngoingTest))
    }

    /// Drop the live session without recording it.
    ///
    /// # Errors
    ///
    /// Returns `TestSessionError::NoOngoingTest` when no session is live.
    pub fn clear_test_session(&mut self) -> Result<TestSession, CommandError> {
        self.session
            .take()
            .ok_or(CommandError::Session(TestSessionError::NoOngoingTest))
    }

    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` describing why the command could not be applied.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        let kind = command.kind();
        log::debug!("executing `{kind}`");

        if self.session.is_some() && !kind.allowed_during_test() {
            return Err(CommandError::TestInProgress);
        }

        match command {
            Command::Add(AddTarget::Deck { title, tags }) => self.add_deck(title, tags),
            Command::Add(AddTarget::Card { deck, card }) => self.add_card(deck, card),
            Command::Edit { index, changes } => match self.open_deck {
                Some(deck) => self.edit_card(deck, index, changes),
                None => self.edit_deck(index, changes),
            },
            Command::Delete { index } => match self.open_deck {
                Some(deck) => self.delete_card(deck, index),
                None => self.delete_deck(index),
            },
            Command::List => {
                self.open_deck = None;
                let listed = self.list_decks(|_| true);
                Ok(CommandResult::new("Listed all decks").with_view(View::Decks(listed)))
            }
            Command::Filter { tags } => {
                let listed = self.list_decks(|deck| tags.iter().any(|tag| deck.has_tag(tag)));
                Ok(CommandResult::new(format!("{} decks listed!", listed.len()))
                    .with_view(View::Decks(listed)))
            }
            Command::SearchDeck { keywords } => {
                let listed = self.list_decks(|deck| deck.matches_keywords(&keywords));
                Ok(CommandResult::new(format!("{} decks listed!", listed.len()))
                    .with_view(View::Decks(listed)))
            }
            Command::SearchCard { keywords } => self.search_cards(&keywords),
            Command::Open { index } => self.open(index),
            Command::Test { index } => self.start_test(index),
            Command::Answer { text } => self.answer(&text),
            Command::Next => self.next(),
            Command::Force => {
                self.session_mut()?.force_correct()?;
                Ok(CommandResult::new("Answer marked as correct."))
            }
            Command::Quit => {
                let session = self.clear_test_session()?;
                log::info!("test on {} quit", session.deck().title());
                Ok(CommandResult::new("Test session ended."))
            }
            Command::Clear => {
                self.repository.clear();
                self.statistics.clear();
                self.open_deck = None;
                Ok(CommandResult::new("All decks have been cleared!")
                    .with_view(View::Decks(Vec::new()))
                    .modified())
            }
            Command::Statistics { index } => self.show_statistics(index),
            Command::Help => Ok(CommandResult::help(help_text())),
            Command::Exit => Ok(CommandResult::exit("Goodbye!")),
        }
    }

    //
    // ─── DECKS AND CARDS ───────────────────────────────────────────────────────
    //

    fn add_deck(&mut self, title: DeckTitle, tags: Vec<Tag>) -> Result<CommandResult, CommandError> {
        let deck = Deck::new(title, tags);
        let feedback = format!("New deck added: {}", deck.title());
        self.repository.add_deck(deck)?;
        let mut result = CommandResult::new(feedback).modified();
        if self.open_deck.is_none() {
            result = result.with_view(View::Decks(self.list_decks(|_| true)));
        }
        Ok(result)
    }

    fn add_card(&mut self, index: Index, card: Flashcard) -> Result<CommandResult, CommandError> {
        let mut deck = self.repository.deck_at(index)?.clone();
        let feedback = format!("New flashcard added: {}", card.question());
        deck.add_card(card)?;
        self.repository.set_deck(index, deck)?;
        Ok(self.after_card_change(index, feedback))
    }

    fn edit_card(
        &mut self,
        deck_index: Index,
        index: Index,
        changes: EditChanges,
    ) -> Result<CommandResult, CommandError> {
        if changes.title.is_some() {
            return Err(CommandError::EditFieldNotApplicable {
                field: "deck title",
            });
        }
        let mut deck = self.repository.deck_at(deck_index)?.clone();
        let mut card = deck
            .card_at(index.zero_based())
            .cloned()
            .ok_or(CommandError::InvalidCardIndex { index })?;
        if let Some(question) = changes.question {
            card = card.with_question(question);
        }
        if let Some(answer) = changes.answer {
            card = card.with_answer(answer);
        }
        let feedback = format!("Edited flashcard: {}", card.question());
        deck.set_card(index.zero_based(), card)?;
        self.repository.set_deck(deck_index, deck)?;
        Ok(self.after_card_change(deck_index, feedback))
    }

    fn edit_deck(&mut self, index: Index, changes: EditChanges) -> Result<CommandResult, CommandError> {
        if changes.question.is_some() {
            return Err(CommandError::EditFieldNotApplicable { field: "question" });
        }
        if changes.answer.is_some() {
            return Err(CommandError::EditFieldNotApplicable { field: "answer" });
        }
        let Some(title) = changes.title else {
            return Err(CommandError::EditFieldNotApplicable { field: "deck" });
        };

        let deck = self.repository.deck_at(index)?;
        let old_title = deck.title().clone();
        let edited = deck.clone().with_title(title.clone());
        self.repository.set_deck(index, edited)?;
        self.statistics.rename_deck(&old_title, &title);

        Ok(CommandResult::new(format!("Edited deck: {title}"))
            .with_view(View::Decks(self.list_decks(|_| true)))
            .modified())
    }

    fn delete_card(&mut self, deck_index: Index, index: Index) -> Result<CommandResult, CommandError> {
        let mut deck = self.repository.deck_at(deck_index)?.clone();
        if deck.card_at(index.zero_based()).is_none() {
            return Err(CommandError::InvalidCardIndex { index });
        }
        let removed = deck.remove_card(index.zero_based())?;
        self.repository.set_deck(deck_index, deck)?;
        let feedback = format!("Deleted flashcard: {}", removed.question());
        Ok(self.after_card_change(deck_index, feedback))
    }

    fn delete_deck(&mut self, index: Index) -> Result<CommandResult, CommandError> {
        let removed = self.repository.remove_deck(index)?;
        let dropped = self.statistics.remove_deck(removed.title());
        if dropped > 0 {
            log::debug!("dropped {dropped} test records of {}", removed.title());
        }
        Ok(
            CommandResult::new(format!("Deleted deck: {}", removed.title()))
                .with_view(View::Decks(self.list_decks(|_| true)))
                .modified(),
        )
    }

    fn open(&mut self, index: Index) -> Result<CommandResult, CommandError> {
        let deck = self.repository.deck_at(index)?;
        let feedback = format!("Opened deck: {}", deck.title());
        let listed = list_cards(deck, |_| true);
        self.open_deck = Some(index);
        Ok(CommandResult::new(feedback).with_view(View::Cards(listed)))
    }

    fn search_cards(&self, keywords: &[String]) -> Result<CommandResult, CommandError> {
        let index = self.open_deck.ok_or(CommandError::NoOpenDeck)?;
        let deck = self.repository.deck_at(index)?;
        let listed = list_cards(deck, |card| {
            keywords
                .iter()
                .any(|keyword| card.question().contains_ignore_case(keyword))
        });
        Ok(
            CommandResult::new(format!("{} flashcards listed!", listed.len()))
                .with_view(View::Cards(listed)),
        )
    }

    fn after_card_change(&self, deck_index: Index, feedback: String) -> CommandResult {
        let result = CommandResult::new(feedback).modified();
        match (self.open_deck, self.repository.deck_at(deck_index)) {
            (Some(open), Ok(deck)) if open == deck_index => {
                result.with_view(View::Cards(list_cards(deck, |_| true)))
            }
            _ => result,
        }
    }

    fn list_decks(&self, keep: impl Fn(&Deck) -> bool) -> Vec<Listed> {
        self.repository
            .decks()
            .iter()
            .enumerate()
            .filter(|(_, deck)| keep(deck))
            .map(|(i, deck)| Listed {
                index: Index::from_zero_based(i),
                label: deck_label(deck),
            })
            .collect()
    }

    //
    // ─── TEST SESSION ──────────────────────────────────────────────────────────
    //

    fn session_mut(&mut self) -> Result<&mut TestSession, CommandError> {
        self.session
            .as_mut()
            .ok_or(CommandError::Session(TestSessionError::NoOngoingTest))
    }

    fn start_test(&mut self, index: Index) -> Result<CommandResult, CommandError> {
        let session = self.test_deck(index)?;
        let title = session.deck().title().clone();
        let total = session.deck().len();
        let view = question_view(session);
        log::info!("test started on {title} with {total} cards");
        Ok(CommandResult::new(format!("Test started on deck: {title}")).with_view(view))
    }

    fn answer(&mut self, text: &str) -> Result<CommandResult, CommandError> {
        let session = self.session_mut()?;
        let verdict = session.submit_answer(text)?;
        let feedback = match verdict {
            Verdict::Correct => "Correct! Type `next` to continue.".to_owned(),
            Verdict::Incorrect => {
                let expected = session
                    .current_card()
                    .map(|card| card.answer().to_string())
                    .unwrap_or_default();
                format!(
                    "Wrong! The expected answer was: {expected}\n\
                     Type `force` to mark it correct, or `next` to continue."
                )
            }
        };
        Ok(CommandResult::new(feedback))
    }

    fn next(&mut self) -> Result<CommandResult, CommandError> {
        let now = self.clock.now();
        let session = self.session_mut()?;
        session.next_question(now)?;
        if !session.is_complete() {
            let view = question_view(session);
            return Ok(CommandResult::new("Next question:").with_view(view));
        }

        let summary = session.summary();
        self.statistics.record(&summary);
        self.session = None;
        log::info!(
            "test on {} finished: {}/{}",
            summary.deck_title,
            summary.correct,
            summary.answered
        );

        Ok(CommandResult::new(format!(
            "Test complete! Score: {}/{} ({:.0}%) in {}s",
            summary.correct,
            summary.answered,
            summary.score_percent(),
            summary.elapsed(now).num_seconds()
        )))
    }

    fn show_statistics(&self, index: Option<Index>) -> Result<CommandResult, CommandError> {
        let feedback = match index {
            Some(index) => {
                let title = self.repository.deck_at(index)?.title();
                let stats = self.statistics.for_deck(title);
                format!("Statistics for {title}:\n{}", describe(&stats))
            }
            None => format!("Overall statistics:\n{}", describe(&self.statistics.overall())),
        };
        Ok(CommandResult::new(feedback))
    }
}

impl fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("decks", &self.repository.decks_count())
            .field("open_deck", &self.open_deck)
            .field("session", &self.session.as_ref().map(TestSession::state))
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

fn deck_label(deck: &Deck) -> String {
    if deck.tags().is_empty() {
        return deck.title().to_string();
    }
    let tags: Vec<&str> = deck.tags().iter().map(Tag::as_str).collect();
    format!("{} [{}]", deck.title(), tags.join(", "))
}

fn list_cards(deck: &Deck, keep: impl Fn(&Flashcard) -> bool) -> Vec<Listed> {
    deck.cards()
        .iter()
        .enumerate()
        .filter(|(_, card)| keep(card))
        .map(|(i, card)| Listed {
            index: Index::from_zero_based(i),
            label: format!("Q: {} | A: {}", card.question(), card.answer()),
        })
        .collect()
}

fn question_view(session: &TestSession) -> View {
    View::Question {
        text: session
            .current_question()
            .map(ToString::to_string)
            .unwrap_or_default(),
        position: session.deck().len() - session.remaining() + 1,
        total: session.deck().len(),
    }
}

fn describe(stats: &DeckStatistics) -> String {
    format!(
        "Tests taken: {}\nCards answered correctly: {}/{} ({:.1}%)\nTime spent: {}s",
        stats.tests,
        stats.cards_correct,
        stats.cards_tested,
        stats.accuracy_percent(),
        stats.time_spent.num_seconds()
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

use chrono::Duration;
use flashdeck_core::model::TestSessionError;
use flashdeck_core::time::fixed_clock;
use services::{CommandError, CommandKind, Logic, LogicError, ParseError, View};
use storage::InMemoryRepository;

fn new_logic() -> Logic {
    Logic::new(Box::new(InMemoryRepository::new()), fixed_clock())
}

fn run(logic: &mut Logic, line: &str) -> services::CommandResult {
    logic
        .run(line)
        .unwrap_or_else(|err| panic!("`{line}` failed: {err}"))
}

#[test]
fn two_card_test_session_end_to_end() {
    let mut logic = new_logic();
    run(&mut logic, "add t/Capitals g/geo");
    run(&mut logic, "add d/1 q/Capital of France? a/Paris");
    run(&mut logic, "add d/1 q/Capital of India? a/New Delhi");

    let started = run(&mut logic, "test 1");
    assert_eq!(
        started.view,
        View::Question {
            text: "Capital of France?".into(),
            position: 1,
            total: 2,
        }
    );

    let answered = run(&mut logic, "answer paris");
    assert!(answered.feedback.starts_with("Correct!"));

    let err = logic.run("answer Paris").unwrap_err();
    assert!(matches!(
        err,
        LogicError::Command(CommandError::Session(TestSessionError::AlreadyAnswered))
    ));

    let next = run(&mut logic, "next");
    assert!(matches!(next.view, View::Question { position: 2, .. }));

    let wrong = run(&mut logic, "answer Mumbai");
    assert!(wrong.feedback.contains("New Delhi"));
    run(&mut logic, "force");
    let err = logic.run("force").unwrap_err();
    assert!(matches!(
        err,
        LogicError::Command(CommandError::Session(TestSessionError::AlreadyCorrect))
    ));

    logic
        .executor_mut()
        .clock_mut()
        .advance(Duration::seconds(75));
    let done = run(&mut logic, "next");
    assert!(done.feedback.contains("Score: 2/2"));
    assert!(logic.executor().test_session().is_none());

    let stats = run(&mut logic, "statistics 1");
    assert!(stats.feedback.contains("Tests taken: 1"));
    assert!(stats.feedback.contains("Time spent: 75s"));
}

#[test]
fn history_records_successful_lines_only() {
    let mut logic = new_logic();
    run(&mut logic, "  add t/Math  ");
    assert!(logic.run("open 5").is_err());
    assert!(logic.run("fly").is_err());
    run(&mut logic, "list");
    run(&mut logic, "list");

    assert_eq!(logic.history().entries(), ["add t/Math", "list", "list"]);
}

#[test]
fn parse_errors_carry_usage() {
    let mut logic = new_logic();
    let err = logic.run("test abc").unwrap_err();
    let LogicError::Parse(parse) = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(parse.kind(), Some(CommandKind::Test));
    assert!(err.to_string().contains(CommandKind::Test.usage()));

    assert!(matches!(
        logic.run("search xyzzy"),
        Err(LogicError::Parse(ParseError::UnknownCommand))
    ));
}

#[test]
fn open_deck_scopes_edit_delete_and_card_search() {
    let mut logic = new_logic();
    run(&mut logic, "add t/Capitals");
    run(&mut logic, "add t/Rivers g/geo");
    run(&mut logic, "add d/1 q/Capital of France? a/Paris");
    run(&mut logic, "add d/1 q/Capital of Peru? a/Lima");

    assert!(matches!(
        logic.run("search card peru"),
        Err(LogicError::Command(CommandError::NoOpenDeck))
    ));

    run(&mut logic, "open 1");
    let found = run(&mut logic, "search cardperu");
    assert!(matches!(found.view, View::Cards(ref cards) if cards.len() == 1));

    run(&mut logic, "edit 2 a/Lima city");
    assert_eq!(logic.decks()[0].cards()[1].answer().as_str(), "Lima city");
    run(&mut logic, "delete 1");
    assert_eq!(logic.decks()[0].len(), 1);
    assert_eq!(logic.decks().len(), 2);

    let listed = run(&mut logic, "list");
    assert!(matches!(listed.view, View::Decks(ref decks) if decks.len() == 2));
    run(&mut logic, "edit 2 t/Big Rivers");
    assert_eq!(logic.decks()[1].title().as_str(), "Big Rivers");

    let filtered = run(&mut logic, "filter geo");
    let View::Decks(decks) = filtered.view else {
        panic!("expected deck listing");
    };
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0].index.one_based(), 2);
}

#[test]
fn test_in_progress_blocks_editing_and_new_test_replaces_it() {
    let mut logic = new_logic();
    run(&mut logic, "add t/A");
    run(&mut logic, "add t/B");
    run(&mut logic, "add d/1 q/a1? a/1");
    run(&mut logic, "add d/2 q/b1? a/1");

    run(&mut logic, "test 1");
    assert!(matches!(
        logic.run("add t/C"),
        Err(LogicError::Command(CommandError::TestInProgress))
    ));
    assert_eq!(logic.decks().len(), 2);

    run(&mut logic, "test 2");
    let session = logic.executor().test_session().unwrap();
    assert_eq!(session.deck().title().as_str(), "B");

    run(&mut logic, "quit");
    assert!(matches!(
        logic.run("next"),
        Err(LogicError::Command(CommandError::Session(
            TestSessionError::NoOngoingTest
        )))
    ));
    assert!(logic.executor().statistics().records().is_empty());
}

#[test]
fn help_exit_and_clear_flags() {
    let mut logic = new_logic();
    run(&mut logic, "add t/A");
    assert!(run(&mut logic, "help").show_help);
    assert!(run(&mut logic, "exit now").exit);

    let cleared = run(&mut logic, "clear");
    assert!(cleared.modified);
    assert!(logic.decks().is_empty());
}

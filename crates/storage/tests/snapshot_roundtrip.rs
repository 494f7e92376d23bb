use flashdeck_core::model::{Deck, DeckTitle, Flashcard, Tag};
use storage::{DeckRepository, InMemoryRepository, JsonSnapshot, StorageError};

fn build_deck(title: &str, cards: &[(&str, &str)]) -> Deck {
    let mut deck = Deck::new(
        DeckTitle::parse(title).unwrap(),
        [Tag::parse("school").unwrap()],
    );
    for (q, a) in cards {
        deck.add_card(Flashcard::from_text(*q, *a).unwrap()).unwrap();
    }
    deck
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = JsonSnapshot::new(dir.path().join("absent.json"));
    assert!(snapshot.load().unwrap().is_empty());
}

#[test]
fn saved_decks_load_back_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = JsonSnapshot::new(dir.path().join("nested").join("decks.json"));

    let repo = InMemoryRepository::from_decks([
        build_deck("Math", &[("2+2?", "4"), ("3*3?", "9")]),
        build_deck("Capitals", &[("France?", "Paris")]),
    ]);
    snapshot.save(repo.decks()).unwrap();

    let loaded = InMemoryRepository::from_decks(snapshot.load().unwrap());
    assert_eq!(loaded.decks(), repo.decks());
    assert_eq!(loaded.decks()[0].card_at(1).unwrap().answer().as_str(), "9");
    assert!(loaded.decks()[1].has_tag(&Tag::parse("school").unwrap()));
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decks.json");
    std::fs::write(&path, r#"{"decks": [{"title": "   "}]}"#).unwrap();

    let err = JsonSnapshot::new(path).load().unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn hand_edited_snapshot_keeps_one_card_per_question() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decks.json");
    std::fs::write(
        &path,
        r#"{"decks": [{
            "title": "Quiz",
            "tags": ["geo", "GEO"],
            "cards": [
                {"question": "Q", "answer": "1"},
                {"question": "q", "answer": "2"}
            ]
        }]}"#,
    )
    .unwrap();

    let repo = InMemoryRepository::from_decks(JsonSnapshot::new(path).load().unwrap());
    let deck = &repo.decks()[0];
    assert_eq!(deck.len(), 1);
    assert_eq!(deck.card_at(0).unwrap().answer().as_str(), "1");
    assert_eq!(deck.tags().len(), 1);
}

//! Per-command argument grammars.

use flashdeck_core::model::{Answer, DeckTitle, Flashcard, Index, Question, Tag, TextError};

use crate::commands::{AddTarget, Command, CommandKind, EditChanges};
use crate::parser::ParseError;
use crate::parser::args::{
    PREFIX_ANSWER, PREFIX_DECK, PREFIX_QUESTION, PREFIX_TAG, PREFIX_TITLE, tokenize,
};

/// Width of the `deck` / `card` word following `search`.
const SEARCH_TARGET_WIDTH: usize = 4;

pub(crate) fn parse_index(kind: CommandKind, args: &str) -> Result<Index, ParseError> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(ParseError::format(kind));
    }
    trimmed
        .parse::<Index>()
        .map_err(|err| ParseError::argument(kind, err))
}

/// `add t/TITLE [g/TAG]...` or `add d/DECK_INDEX q/QUESTION a/ANSWER`
pub(crate) fn parse_add(args: &str) -> Result<Command, ParseError> {
    const KIND: CommandKind = CommandKind::Add;
    let map = tokenize(
        args,
        &[
            PREFIX_TITLE,
            PREFIX_TAG,
            PREFIX_DECK,
            PREFIX_QUESTION,
            PREFIX_ANSWER,
        ],
    );
    if !map.preamble().is_empty() {
        return Err(ParseError::format(KIND));
    }

    let card_fields = [PREFIX_DECK, PREFIX_QUESTION, PREFIX_ANSWER];

    if let Some(title) = map.value(PREFIX_TITLE) {
        if card_fields.iter().any(|p| map.has(*p)) {
            return Err(ParseError::format(KIND));
        }
        let title = DeckTitle::parse(title).map_err(|e| ParseError::argument(KIND, e))?;
        let tags = map
            .all_values(PREFIX_TAG)
            .iter()
            .map(|raw| Tag::parse(raw.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::argument(KIND, e))?;
        return Ok(Command::Add(AddTarget::Deck { title, tags }));
    }

    if map.has(PREFIX_TAG) {
        return Err(ParseError::format(KIND));
    }
    let (Some(deck), Some(question), Some(answer)) = (
        map.value(PREFIX_DECK),
        map.value(PREFIX_QUESTION),
        map.value(PREFIX_ANSWER),
    ) else {
        return Err(ParseError::format(KIND));
    };

    let deck = parse_index(KIND, deck)?;
    let card = Flashcard::from_text(question, answer).map_err(|e| ParseError::argument(KIND, e))?;
    Ok(Command::Add(AddTarget::Card { deck, card }))
}

/// `edit INDEX [t/TITLE] [q/QUESTION] [a/ANSWER]`
pub(crate) fn parse_edit(args: &str) -> Result<Command, ParseError> {
    const KIND: CommandKind = CommandKind::Edit;
    let map = tokenize(args, &[PREFIX_TITLE, PREFIX_QUESTION, PREFIX_ANSWER]);
    let index = parse_index(KIND, map.preamble())?;

    let invalid = |e: TextError| ParseError::argument(KIND, e);
    let changes = EditChanges {
        title: map
            .value(PREFIX_TITLE)
            .map(DeckTitle::parse)
            .transpose()
            .map_err(invalid)?,
        question: map
            .value(PREFIX_QUESTION)
            .map(Question::parse)
            .transpose()
            .map_err(invalid)?,
        answer: map
            .value(PREFIX_ANSWER)
            .map(Answer::parse)
            .transpose()
            .map_err(invalid)?,
    };

    if changes.is_empty() {
        return Err(ParseError::argument(
            KIND,
            "At least one field to edit must be provided.",
        ));
    }
    Ok(Command::Edit { index, changes })
}

/// `filter TAG [TAG]...`
pub(crate) fn parse_filter(args: &str) -> Result<Command, ParseError> {
    const KIND: CommandKind = CommandKind::Filter;
    let tags = args
        .split_whitespace()
        .map(Tag::parse)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ParseError::argument(KIND, e))?;
    if tags.is_empty() {
        return Err(ParseError::format(KIND));
    }
    Ok(Command::Filter { tags })
}

/// `search deck KEYWORD...` / `search card KEYWORD...`
///
/// The target word sits at a fixed offset: one separator character after the
/// command word, then four characters. Keywords start right after it, so
/// `search deckmath` searches decks for `math`.
pub(crate) fn parse_search(args: &str) -> Result<Command, ParseError> {
    let end = 1 + SEARCH_TARGET_WIDTH;
    let (Some(target), Some(rest)) = (args.get(1..end), args.get(end..)) else {
        return Err(ParseError::UnknownCommand);
    };

    match target {
        "deck" => parse_keywords(CommandKind::SearchDeck, rest)
            .map(|keywords| Command::SearchDeck { keywords }),
        "card" => parse_keywords(CommandKind::SearchCard, rest)
            .map(|keywords| Command::SearchCard { keywords }),
        _ => Err(ParseError::UnknownCommand),
    }
}

fn parse_keywords(kind: CommandKind, args: &str) -> Result<Vec<String>, ParseError> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_owned).collect();
    if keywords.is_empty() {
        return Err(ParseError::format(kind));
    }
    Ok(keywords)
}

/// `answer TEXT`
pub(crate) fn parse_answer(args: &str) -> Result<Command, ParseError> {
    let text = args.trim();
    if text.is_empty() {
        return Err(ParseError::format(CommandKind::Answer));
    }
    Ok(Command::Answer {
        text: text.to_owned(),
    })
}

/// `statistics [INDEX]`
pub(crate) fn parse_statistics(args: &str) -> Result<Command, ParseError> {
    if args.trim().is_empty() {
        return Ok(Command::Statistics { index: None });
    }
    parse_index(CommandKind::Statistics, args).map(|index| Command::Statistics {
        index: Some(index),
    })
}

//! Prefix tokenizer for `key/value` style arguments.

use std::collections::HashMap;

/// A marker such as `q/` introducing an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    #[must_use]
    pub const fn new(prefix: &'static str) -> Self {
        Self(prefix)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub const PREFIX_TITLE: Prefix = Prefix::new("t/");
pub const PREFIX_TAG: Prefix = Prefix::new("g/");
pub const PREFIX_DECK: Prefix = Prefix::new("d/");
pub const PREFIX_QUESTION: Prefix = Prefix::new("q/");
pub const PREFIX_ANSWER: Prefix = Prefix::new("a/");

/// Arguments split by prefix.
///
/// The preamble is the text before the first prefix. Values are trimmed and
/// kept in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    #[must_use]
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    #[must_use]
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }
}

/// Split `args` on every occurrence of `prefixes` that follows whitespace
/// or starts the text.
#[must_use]
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let padded = format!(" {args}");

    let mut positions: Vec<(usize, Prefix)> = prefixes
        .iter()
        .flat_map(|prefix| {
            let padded = padded.as_str();
            padded
                .match_indices(prefix.as_str())
                .filter(move |(at, _)| padded[..*at].ends_with(char::is_whitespace))
                .map(move |(at, _)| (at, *prefix))
        })
        .collect();
    positions.sort_by_key(|(at, _)| *at);

    let preamble_end = positions.first().map_or(padded.len(), |(at, _)| *at);
    let mut map = ArgumentMultimap {
        preamble: padded[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (i, (at, prefix)) in positions.iter().enumerate() {
        let start = at + prefix.as_str().len();
        let end = positions.get(i + 1).map_or(padded.len(), |(next, _)| *next);
        map.values
            .entry(*prefix)
            .or_default()
            .push(padded[start..end].trim().to_string());
    }

    map
}

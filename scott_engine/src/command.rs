//! Command module
//!
//! Turns a raw input line into verb and noun indices for the current game.

use scott_data::Game;

use crate::vocabulary::lookup;

/// A player command resolved against the game's dictionaries.
///
/// `verb`/`noun` are `None` when the word is not in the dictionary; the texts
/// are kept as typed (uppercased) so they can be echoed back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub verb_text: String,
    pub noun_text: String,
    pub verb: Option<usize>,
    pub noun: Option<usize>,
}

impl ParsedCommand {
    /// True when the verb is verb 0, the automatic-action verb.
    pub fn is_automatic(&self) -> bool {
        self.verb == Some(0)
    }
}

/// Significant word length for a game, at least one character.
pub fn word_length(game: &Game) -> usize {
    usize::try_from(game.header.word_length).unwrap_or(0).max(1)
}

/// Resolve a raw input line.
///
/// The line is uppercased and trimmed, then split at the first run of
/// whitespace into a verb and the rest as the noun. Single-letter direction
/// and inventory shortcuts are expanded before lookup.
pub fn parse_command(game: &Game, raw: &str) -> ParsedCommand {
    let line = raw.trim().to_uppercase();
    let (verb_text, noun_text) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_string(), rest.trim_start().to_string()),
        None => (line.clone(), String::new()),
    };

    let (verb_text, noun_text) = match expand_alias(&verb_text) {
        Some((verb, Some(noun))) => (verb.to_string(), noun.to_string()),
        Some((verb, None)) => (verb.to_string(), noun_text),
        None => (verb_text, noun_text),
    };

    resolve(game, verb_text, noun_text)
}

/// The command run once per turn for automatic actions: the texts of verb 0
/// and noun 0, resolved through the normal lookup.
pub fn default_command(game: &Game) -> ParsedCommand {
    let verb_text = game.verbs.first().map(|w| w.text.clone()).unwrap_or_default();
    let noun_text = game.nouns.first().map(|w| w.text.clone()).unwrap_or_default();
    resolve(game, verb_text, noun_text)
}

fn resolve(game: &Game, verb_text: String, noun_text: String) -> ParsedCommand {
    let len = word_length(game);
    ParsedCommand {
        verb: lookup(&game.verbs, &verb_text, len),
        noun: lookup(&game.nouns, &noun_text, len),
        verb_text,
        noun_text,
    }
}

/// Shortcut words: directions become `GO <direction>`, `I` becomes inventory.
fn expand_alias(verb: &str) -> Option<(&'static str, Option<&'static str>)> {
    let expanded = match verb {
        "N" => ("GO", Some("NORTH")),
        "S" => ("GO", Some("SOUTH")),
        "E" => ("GO", Some("EAST")),
        "W" => ("GO", Some("WEST")),
        "U" => ("GO", Some("UP")),
        "D" => ("GO", Some("DOWN")),
        "I" => ("INVENTORY", None),
        _ => return None,
    };
    Some(expanded)
}

//! Decoder: token stream to [`Game`].
//!
//! The file is read in eight fixed phases. The header comes first and fixes the
//! element count of every later phase. Any failure aborts the whole decode and
//! is reported with the phase and the element being read.

use std::fmt;

use log::debug;
use scott_data::{
    Action, CODES_PER_ACTION, CONDITIONS_PER_ACTION, Condition, EXIT_COUNT, Footer, Game, Header, Item, Room, Word,
};
use thiserror::Error;

use crate::pack::{unpack_action_codes, unpack_condition, unpack_verb_noun};
use crate::token::{StreamError, TokenStream, TokenizeError};

/// Marker prefixed to synonyms, literal room descriptions and treasures.
const MARKER: char = '*';

/// Delimiter around an item's autograb noun.
const AUTOGRAB_DELIMITER: char = '/';

/// Sections of a data file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Header,
    Actions,
    Words,
    Rooms,
    Messages,
    Items,
    Comments,
    Footer,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Header,
        Phase::Actions,
        Phase::Words,
        Phase::Rooms,
        Phase::Messages,
        Phase::Items,
        Phase::Comments,
        Phase::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Header => "header",
            Phase::Actions => "actions",
            Phase::Words => "words",
            Phase::Rooms => "rooms",
            Phase::Messages => "messages",
            Phase::Items => "items",
            Phase::Comments => "comments",
            Phase::Footer => "footer",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("count field holds {0}, expected -1 or more")]
    InvalidCount(i64),
    #[error("{0} unexpected tokens after the footer")]
    TrailingTokens(usize),
}

/// Errors from [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("could not tokenize game data: {0}")]
    Tokenize(#[from] TokenizeError),
    #[error("error parsing {phase} at {location}: {source}")]
    Phase {
        phase: Phase,
        location: String,
        #[source]
        source: FieldError,
    },
}

impl DecodeError {
    /// Phase that failed, if tokenizing succeeded.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            DecodeError::Tokenize(_) => None,
            DecodeError::Phase { phase, .. } => Some(*phase),
        }
    }
}

/// Decode raw game data.
///
/// # Errors
/// Any tokenizer failure, or any phase that finds the wrong token type, runs
/// out of tokens or reads an unusable value.
pub fn decode(data: &[u8]) -> Result<Game, DecodeError> {
    let stream = TokenStream::new(data)?;
    debug!("tokenized {} bytes into {} tokens", data.len(), stream.remaining());
    decode_tokens(stream)
}

/// Decode an already tokenized stream.
///
/// # Errors
/// See [`decode`].
pub fn decode_tokens(stream: TokenStream) -> Result<Game, DecodeError> {
    let mut decoder = Decoder {
        stream,
        game: Game::default(),
    };
    for phase in Phase::ALL {
        decoder.run(phase)?;
    }
    decoder.finish()
}

struct Decoder {
    stream: TokenStream,
    game: Game,
}

fn fail(phase: Phase, location: String, err: impl Into<FieldError>) -> DecodeError {
    DecodeError::Phase {
        phase,
        location,
        source: err.into(),
    }
}

impl Decoder {
    fn run(&mut self, phase: Phase) -> Result<(), DecodeError> {
        match phase {
            Phase::Header => self.header(),
            Phase::Actions => self.actions(),
            Phase::Words => self.words(),
            Phase::Rooms => self.rooms(),
            Phase::Messages => self.messages(),
            Phase::Items => self.items(),
            Phase::Comments => self.comments(),
            Phase::Footer => self.footer(),
        }?;
        debug!("decoded {phase}; {} tokens left", self.stream.remaining());
        Ok(())
    }

    fn finish(self) -> Result<Game, DecodeError> {
        let left = self.stream.remaining();
        if left > 0 {
            return Err(fail(Phase::Footer, "end of file".into(), FieldError::TrailingTokens(left)));
        }
        Ok(self.game)
    }

    fn int(&mut self, phase: Phase, location: impl FnOnce() -> String) -> Result<i64, DecodeError> {
        self.stream.next_int().map_err(|e| fail(phase, location(), e))
    }

    fn text(&mut self, phase: Phase, location: impl FnOnce() -> String) -> Result<String, DecodeError> {
        self.stream.next_text().map_err(|e| fail(phase, location(), e))
    }

    fn header(&mut self) -> Result<(), DecodeError> {
        const FIELDS: [&str; 12] = [
            "reserved",
            "num_items",
            "num_actions",
            "num_words",
            "num_rooms",
            "max_inventory",
            "starting_room",
            "num_treasures",
            "word_length",
            "light_duration",
            "num_messages",
            "treasure_room",
        ];
        let mut raw = [0i64; 12];
        for (slot, name) in raw.iter_mut().zip(FIELDS) {
            *slot = self.int(Phase::Header, || format!("header.{name}"))?;
        }

        // The file stores the highest index; the model stores a count.
        let count = |field: usize| -> Result<usize, DecodeError> {
            let value = raw[field];
            value
                .checked_add(1)
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| fail(Phase::Header, format!("header.{}", FIELDS[field]), FieldError::InvalidCount(value)))
        };

        self.game.header = Header {
            reserved: raw[0],
            num_items: count(1)?,
            num_actions: count(2)?,
            num_words: count(3)?,
            num_rooms: count(4)?,
            max_inventory: raw[5],
            starting_room: raw[6],
            num_treasures: raw[7],
            word_length: raw[8],
            light_duration: raw[9],
            num_messages: count(10)?,
            treasure_room: raw[11],
        };
        Ok(())
    }

    fn actions(&mut self) -> Result<(), DecodeError> {
        const PHASE: Phase = Phase::Actions;
        for i in 0..self.game.header.num_actions {
            let raw = self.int(PHASE, || format!("actions[{i}].verb_noun"))?;
            let (verb, noun) = unpack_verb_noun(raw);

            let mut conditions = [Condition::default(); CONDITIONS_PER_ACTION];
            for (j, slot) in conditions.iter_mut().enumerate() {
                let raw = self.int(PHASE, || format!("actions[{i}].condition[{j}]"))?;
                *slot = unpack_condition(raw);
            }

            let mut codes = [0i64; CODES_PER_ACTION];
            for (j, pair) in codes.chunks_exact_mut(2).enumerate() {
                let raw = self.int(PHASE, || format!("actions[{i}].action[{j}]"))?;
                (pair[0], pair[1]) = unpack_action_codes(raw);
            }

            self.game.actions.push(Action {
                verb,
                noun,
                conditions,
                codes,
                comment: String::new(),
            });
        }
        Ok(())
    }

    /// Verbs and nouns are stored as interleaved pairs.
    fn words(&mut self) -> Result<(), DecodeError> {
        for i in 0..self.game.header.num_words {
            let verb = self.text(Phase::Words, || format!("words[{i}].verb"))?;
            self.game.verbs.push(make_word(&verb));
            let noun = self.text(Phase::Words, || format!("words[{i}].noun"))?;
            self.game.nouns.push(make_word(&noun));
        }
        Ok(())
    }

    fn rooms(&mut self) -> Result<(), DecodeError> {
        for i in 0..self.game.header.num_rooms {
            let mut exits = [0i64; EXIT_COUNT];
            for (j, exit) in exits.iter_mut().enumerate() {
                *exit = self.int(Phase::Rooms, || format!("rooms[{i}].exit[{j}]"))?;
            }
            let raw = self.text(Phase::Rooms, || format!("rooms[{i}].description"))?;
            let (is_literal, description) = strip_marker(&raw);
            self.game.rooms.push(Room {
                exits,
                description: description.to_string(),
                is_literal,
            });
        }
        Ok(())
    }

    fn messages(&mut self) -> Result<(), DecodeError> {
        for i in 0..self.game.header.num_messages {
            let message = self.text(Phase::Messages, || format!("messages[{i}]"))?;
            self.game.messages.push(message);
        }
        Ok(())
    }

    fn items(&mut self) -> Result<(), DecodeError> {
        for i in 0..self.game.header.num_items {
            let raw = self.text(Phase::Items, || format!("items[{i}].description"))?;
            let location = self.int(Phase::Items, || format!("items[{i}].location"))?;
            let (is_treasure, description, autograb) = split_item_text(&raw);
            self.game.items.push(Item {
                description,
                autograb,
                location,
                is_treasure,
            });
        }
        Ok(())
    }

    fn comments(&mut self) -> Result<(), DecodeError> {
        for i in 0..self.game.header.num_actions {
            let comment = self.text(Phase::Comments, || format!("comments[{i}]"))?;
            self.game.actions[i].comment = comment;
        }
        Ok(())
    }

    fn footer(&mut self) -> Result<(), DecodeError> {
        let version = self.int(Phase::Footer, || "footer.version".into())?;
        let adventure = self.int(Phase::Footer, || "footer.adventure".into())?;
        let magic = self.int(Phase::Footer, || "footer.magic".into())?;
        self.game.footer = Footer {
            version,
            adventure,
            magic,
        };
        Ok(())
    }
}

/// Split off a leading marker, reporting whether it was present.
fn strip_marker(raw: &str) -> (bool, &str) {
    match raw.strip_prefix(MARKER) {
        Some(rest) => (true, rest),
        None => (false, raw),
    }
}

fn make_word(raw: &str) -> Word {
    let (is_synonym, text) = strip_marker(raw);
    Word {
        text: text.to_string(),
        is_synonym,
    }
}

/// Split an item string into treasure flag, description and autograb noun.
///
/// `"*Gold coin*/COI/"` becomes `(true, "Gold coin*", Some("COI"))`. The noun is
/// the text between the last two slashes, and only counts when the string ends
/// with a slash.
fn split_item_text(raw: &str) -> (bool, String, Option<String>) {
    let (is_treasure, rest) = strip_marker(raw);
    if let Some(body) = rest.strip_suffix(AUTOGRAB_DELIMITER)
        && let Some((description, noun)) = body.rsplit_once(AUTOGRAB_DELIMITER)
    {
        return (is_treasure, description.to_string(), Some(noun.to_string()));
    }
    (is_treasure, rest.to_string(), None)
}

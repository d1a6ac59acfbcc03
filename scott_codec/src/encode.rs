//! Encoder: [`Game`] back to the ScottFree byte layout.
//!
//! This is the exact inverse of [`crate::decode`]: a game decoded from bytes
//! `B` and encoded again without changes reproduces `B` byte for byte.

use std::io::{self, Write};

use log::debug;
use scott_data::{Action, Game, Header, Item, Room, Word};
use thiserror::Error;

use crate::pack::{pack_action_codes, pack_condition, pack_verb_noun};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{location} contains {found:?}, which has no single-byte encoding")]
    UnencodableChar { location: String, found: char },
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Encode a game into a new buffer.
///
/// # Errors
/// Text containing characters above `U+00FF`.
pub fn encode(game: &Game) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    write_game(&mut out, game)?;
    debug!("encoded game into {} bytes", out.len());
    Ok(out)
}

/// Write a game in the ScottFree layout.
///
/// # Errors
/// Text containing characters above `U+00FF`, or a failing writer.
pub fn write_game<W: Write>(out: &mut W, game: &Game) -> Result<(), EncodeError> {
    let mut w = Writer { out };
    w.header(&game.header)?;
    for action in &game.actions {
        w.action(action)?;
    }
    for (i, (verb, noun)) in game.verbs.iter().zip(&game.nouns).enumerate() {
        w.word(verb, || format!("words[{i}].verb"))?;
        w.word(noun, || format!("words[{i}].noun"))?;
    }
    for (i, room) in game.rooms.iter().enumerate() {
        w.room(i, room)?;
    }
    for (i, message) in game.messages.iter().enumerate() {
        w.text(message, || format!("messages[{i}]"))?;
    }
    for (i, item) in game.items.iter().enumerate() {
        w.item(i, item)?;
    }
    for (i, action) in game.actions.iter().enumerate() {
        w.text(&action.comment, || format!("comments[{i}]"))?;
    }
    w.int(game.footer.version)?;
    w.int(game.footer.adventure)?;
    w.int(game.footer.magic)?;
    Ok(())
}

struct Writer<'a, W: Write> {
    out: &'a mut W,
}

impl<W: Write> Writer<'_, W> {
    fn header(&mut self, h: &Header) -> Result<(), EncodeError> {
        self.int(h.reserved)?;
        self.count(h.num_items)?;
        self.count(h.num_actions)?;
        self.count(h.num_words)?;
        self.count(h.num_rooms)?;
        self.int(h.max_inventory)?;
        self.int(h.starting_room)?;
        self.int(h.num_treasures)?;
        self.int(h.word_length)?;
        self.int(h.light_duration)?;
        self.count(h.num_messages)?;
        self.int(h.treasure_room)
    }

    fn action(&mut self, action: &Action) -> Result<(), EncodeError> {
        self.int(pack_verb_noun(action.verb, action.noun))?;
        for condition in action.conditions {
            self.int(pack_condition(condition))?;
        }
        for pair in action.codes.chunks_exact(2) {
            self.int(pack_action_codes(pair[0], pair[1]))?;
        }
        Ok(())
    }

    fn word(&mut self, word: &Word, location: impl Fn() -> String) -> Result<(), EncodeError> {
        self.marked_text(word.is_synonym, &word.text, location)
    }

    fn room(&mut self, index: usize, room: &Room) -> Result<(), EncodeError> {
        for exit in room.exits {
            self.int(exit)?;
        }
        self.marked_text(room.is_literal, &room.description, || format!("rooms[{index}].description"))
    }

    /// Items put the description and the location on one line.
    fn item(&mut self, index: usize, item: &Item) -> Result<(), EncodeError> {
        let location = || format!("items[{index}].description");
        self.out.write_all(b"\"")?;
        if item.is_treasure {
            self.out.write_all(b"*")?;
        }
        self.bytes(&item.description, location)?;
        if let Some(noun) = &item.autograb {
            self.out.write_all(b"/")?;
            self.bytes(noun, location)?;
            self.out.write_all(b"/")?;
        }
        writeln!(self.out, "\" {} ", item.location)?;
        Ok(())
    }

    fn marked_text(&mut self, marked: bool, text: &str, location: impl Fn() -> String) -> Result<(), EncodeError> {
        self.out.write_all(b"\"")?;
        if marked {
            self.out.write_all(b"*")?;
        }
        self.bytes(text, location)?;
        self.out.write_all(b"\"\n")?;
        Ok(())
    }

    fn text(&mut self, text: &str, location: impl Fn() -> String) -> Result<(), EncodeError> {
        self.marked_text(false, text, location)
    }

    /// Header counts go back to the highest index the file expects.
    fn count(&mut self, count: usize) -> Result<(), EncodeError> {
        self.int(to_i64(count) - 1)
    }

    fn int(&mut self, value: i64) -> Result<(), EncodeError> {
        if value >= 0 {
            writeln!(self.out, " {value} ")?;
        } else {
            writeln!(self.out, "{value} ")?;
        }
        Ok(())
    }

    fn bytes(&mut self, text: &str, location: impl Fn() -> String) -> Result<(), EncodeError> {
        let mut buf = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let byte = u8::try_from(ch).map_err(|_| EncodeError::UnencodableChar {
                location: location(),
                found: ch,
            })?;
            buf.push(byte);
        }
        self.out.write_all(&buf)?;
        Ok(())
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

use std::fmt;

use crate::*;

/// Radix of the verb/noun and action-code pairs.
const PAIR_RADIX: i64 = 150;

/// Validation error for inconsistent counts or out-of-range references in a `Game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    CountMismatch { field: &'static str, header: usize, actual: usize },
    MissingReference { kind: &'static str, index: i64, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CountMismatch { field, header, actual } => {
                write!(f, "header {field} is {header} but the game has {actual}")
            },
            ValidationError::MissingReference { kind, index, context } => {
                write!(f, "missing {kind} {index} ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check counts, room references and packed-field ranges in a `Game`.
///
/// ```
/// use scott_data::{Game, Header, Room, validate_game};
///
/// let game = Game {
///     header: Header {
///         num_rooms: 2,
///         starting_room: 1,
///         word_length: 3,
///         ..Header::default()
///     },
///     rooms: vec![Room::default(), Room::default()],
///     ..Game::default()
/// };
/// assert!(validate_game(&game).is_empty());
/// ```
pub fn validate_game(game: &Game) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let header = &game.header;

    check_count("num_items", header.num_items, game.items.len(), &mut errors);
    check_count("num_actions", header.num_actions, game.actions.len(), &mut errors);
    check_count("num_words", header.num_words, game.verbs.len(), &mut errors);
    check_count("num_words", header.num_words, game.nouns.len(), &mut errors);
    check_count("num_rooms", header.num_rooms, game.rooms.len(), &mut errors);
    check_count("num_messages", header.num_messages, game.messages.len(), &mut errors);


    if game.room(header.starting_room).is_none() {
        errors.push(ValidationError::InvalidValue {
            context: format!("starting room {} is not a room", header.starting_room),
        });
    }

    if header.word_length < 1 {
        errors.push(ValidationError::InvalidValue {
            context: format!("word length {} is too short", header.word_length),
        });
    }

    for (index, room) in game.rooms.iter().enumerate() {
        for direction in Direction::ALL {
            let to = room.exit(direction);
            if game.room(to).is_none() {
                errors.push(ValidationError::MissingReference {
                    kind: "room",
                    index: to,
                    context: format!("rooms[{index}] exit {direction}"),
                });
            }
        }
    }

    for (index, item) in game.items.iter().enumerate() {
        if !item.is_carried() && game.room(item.location).is_none() {
            errors.push(ValidationError::MissingReference {
                kind: "room",
                index: item.location,
                context: format!("items[{index}] location"),
            });
        }
    }

    for (index, action) in game.actions.iter().enumerate() {
        validate_action(action, index, &mut errors);
    }

    errors
}

fn check_count(field: &'static str, header: usize, actual: usize, errors: &mut Vec<ValidationError>) {
    if header != actual {
        errors.push(ValidationError::CountMismatch { field, header, actual });
    }
}

fn validate_action(action: &Action, index: usize, errors: &mut Vec<ValidationError>) {
    let mut check = |high: i64, low: i64, radix: i64, what: String| {
        if !packs(high, low, radix) {
            errors.push(ValidationError::InvalidValue {
                context: format!("actions[{index}].{what} does not pack with radix {radix}"),
            });
        }
    };
    check(action.verb, action.noun, PAIR_RADIX, format!("noun {}", action.noun));
    for (slot, condition) in action.conditions.iter().enumerate() {
        check(
            condition.value,
            condition.code,
            ConditionKind::COUNT,
            format!("condition[{slot}] {}", condition.code),
        );
    }
    for slot in [0, 2] {
        let (first, second) = (action.codes[slot], action.codes[slot + 1]);
        check(first, second, PAIR_RADIX, format!("code[{}] {second}", slot + 1));
    }
}

/// True when `high * radix + low` unpacks back to the same two values under
/// truncating division.
fn packs(high: i64, low: i64, radix: i64) -> bool {
    let joined = high.checked_mul(radix).and_then(|h| h.checked_add(low));
    joined.is_some_and(|raw| raw / radix == high && raw % radix == low)
}

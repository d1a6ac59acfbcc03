//! Model types decoded from a ScottFree data file.
//!
//! Every type here is a plain owned value. Cloning a [`Game`] produces a fully
//! independent copy, which is what the engine relies on when it derives a
//! mutable session from the decoded original.

use std::fmt;

/// Number of exit slots per room, in N, S, E, W, Up, Down order.
pub const EXIT_COUNT: usize = 6;

/// Number of conditions stored for every action.
pub const CONDITIONS_PER_ACTION: usize = 5;

/// Number of action codes stored for every action (two per packed integer).
pub const CODES_PER_ACTION: usize = 4;

/// Item location meaning "carried by the player".
pub const CARRIED: i64 = -1;

/// Carried location as ScottFree reads it, through an unsigned byte. Accepted
/// wherever [`CARRIED`] is.
pub const CARRIED_BYTE: i64 = 255;

/// Item location meaning "not anywhere in the world".
pub const DESTROYED: i64 = 0;

/// True for both spellings of the carried location.
pub fn is_carried_location(location: i64) -> bool {
    location == CARRIED || location == CARRIED_BYTE
}

/// Header fields, with the five count fields already normalized to counts.
///
/// The file stores the highest index for items, actions, words, rooms and
/// messages; the model stores how many there are (file value plus one).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// First header integer. Its meaning is not documented by the format.
    pub reserved: i64,
    pub num_items: usize,
    pub num_actions: usize,
    pub num_words: usize,
    pub num_rooms: usize,
    pub max_inventory: i64,
    pub starting_room: i64,
    pub num_treasures: i64,
    /// Number of leading characters that distinguish one word from another.
    pub word_length: i64,
    pub light_duration: i64,
    pub num_messages: usize,
    pub treasure_room: i64,
}

/// A dictionary entry. Synonyms carry no meaning of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub is_synonym: bool,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_synonym: false,
        }
    }

    pub fn synonym(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_synonym: true,
        }
    }
}

/// The six movement directions, in exit slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; EXIT_COUNT] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Direction named by a noun index. Nouns 1 through 6 are the directions.
    pub fn from_noun(noun: usize) -> Option<Direction> {
        noun.checked_sub(1).and_then(|slot| Self::ALL.get(slot).copied())
    }

    /// Index into [`Room::exits`].
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Up => "Up",
            Direction::Down => "Down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A room: six exits and a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Room {
    /// Destination room per direction; 0 means there is no exit.
    pub exits: [i64; EXIT_COUNT],
    pub description: String,
    /// Literal descriptions are shown as-is rather than after "I'm in a ".
    pub is_literal: bool,
}

impl Room {
    pub fn exit(&self, direction: Direction) -> i64 {
        self.exits[direction.slot()]
    }

    /// Text shown to the player for this room.
    pub fn display_text(&self) -> String {
        if self.is_literal {
            self.description.clone()
        } else {
            format!("I'm in a {}", self.description)
        }
    }
}

/// An object in the world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub description: String,
    /// Noun that lets plain GET/DROP work on this item.
    pub autograb: Option<String>,
    /// Room index, [`CARRIED`] or [`DESTROYED`]. In a freshly decoded game this
    /// is the item's home location, exactly as stored.
    pub location: i64,
    pub is_treasure: bool,
}

impl Item {
    /// Description with the treasure marker restored, as players see it.
    pub fn display_text(&self) -> String {
        if self.is_treasure {
            format!("*{}", self.description)
        } else {
            self.description.clone()
        }
    }

    pub fn is_carried(&self) -> bool {
        is_carried_location(self.location)
    }
}

/// Kinds of action conditions. The discriminants are the codes stored in the
/// file (packed value modulo 20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionKind {
    /// Not a test: the value is an argument for the action codes.
    #[default]
    Parameter = 0,
    Carried = 1,
    Here = 2,
    Present = 3,
    At = 4,
    NotHere = 5,
    NotCarried = 6,
    NotAt = 7,
    FlagSet = 8,
    FlagClear = 9,
    Loaded = 10,
    NotLoaded = 11,
    NotPresent = 12,
    Exists = 13,
    NotExists = 14,
    CounterLe = 15,
    CounterGt = 16,
    NotMoved = 17,
    Moved = 18,
    CounterEq = 19,
}

impl ConditionKind {
    /// Number of distinct condition codes.
    pub const COUNT: i64 = 20;

    pub fn from_code(code: i64) -> Option<ConditionKind> {
        use ConditionKind::*;
        let kind = match code {
            0 => Parameter,
            1 => Carried,
            2 => Here,
            3 => Present,
            4 => At,
            5 => NotHere,
            6 => NotCarried,
            7 => NotAt,
            8 => FlagSet,
            9 => FlagClear,
            10 => Loaded,
            11 => NotLoaded,
            12 => NotPresent,
            13 => Exists,
            14 => NotExists,
            15 => CounterLe,
            16 => CounterGt,
            17 => NotMoved,
            18 => Moved,
            19 => CounterEq,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// One of an action's five conditions.
///
/// The code is kept as stored: a negative packed condition yields a code
/// outside `0..20` that names no [`ConditionKind`] but must still be written
/// back unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Condition {
    pub code: i64,
    pub value: i64,
}

impl Condition {
    pub fn new(kind: ConditionKind, value: i64) -> Self {
        Self {
            code: kind.code(),
            value,
        }
    }

    pub fn kind(self) -> Option<ConditionKind> {
        ConditionKind::from_code(self.code)
    }
}

/// A scripted rule: when the command and conditions match, run the codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    pub verb: i64,
    /// Noun index, or 0 to match any noun.
    pub noun: i64,
    pub conditions: [Condition; CONDITIONS_PER_ACTION],
    /// Effect codes, run in order. Code 0 does nothing.
    pub codes: [i64; CODES_PER_ACTION],
    pub comment: String,
}

/// Trailing version information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    pub version: i64,
    pub adventure: i64,
    pub magic: i64,
}

impl Footer {
    /// Version in the customary `v.vv` form (416 becomes "4.16").
    pub fn version_string(&self) -> String {
        format!("{}.{:02}", self.version / 100, (self.version % 100).abs())
    }
}

/// A complete decoded adventure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub header: Header,
    pub actions: Vec<Action>,
    pub verbs: Vec<Word>,
    pub nouns: Vec<Word>,
    pub rooms: Vec<Room>,
    pub messages: Vec<String>,
    pub items: Vec<Item>,
    pub footer: Footer,
}

impl Game {
    /// Index of the last room, where dead players end up.
    pub fn last_room(&self) -> i64 {
        i64::try_from(self.rooms.len().saturating_sub(1)).unwrap_or(i64::MAX)
    }

    /// Room at a stored location, if there is one.
    pub fn room(&self, location: i64) -> Option<&Room> {
        usize::try_from(location).ok().and_then(|index| self.rooms.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_noun_covers_one_through_six() {
        assert_eq!(Direction::from_noun(0), None);
        assert_eq!(Direction::from_noun(1), Some(Direction::North));
        assert_eq!(Direction::from_noun(6), Some(Direction::Down));
        assert_eq!(Direction::from_noun(7), None);
        assert_eq!(Direction::West.slot(), 3);
    }

    #[test]
    fn condition_kind_codes_round_trip() {
        for code in 0..ConditionKind::COUNT {
            let kind = ConditionKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
            assert_eq!(Condition::new(kind, 4).kind(), Some(kind));
        }
        assert_eq!(ConditionKind::from_code(20), None);
        assert_eq!(Condition { code: -1, value: -1 }.kind(), None);
    }

    #[test]
    fn both_carried_spellings_count() {
        let mut item = Item {
            location: CARRIED,
            ..Item::default()
        };
        assert!(item.is_carried());
        item.location = CARRIED_BYTE;
        assert!(item.is_carried());
        item.location = DESTROYED;
        assert!(!item.is_carried());
    }

    #[test]
    fn room_lookup_rejects_negative_locations() {
        let game = Game {
            rooms: vec![Room::default(), Room::default()],
            ..Game::default()
        };
        assert!(game.room(1).is_some());
        assert!(game.room(-1).is_none());
        assert!(game.room(2).is_none());
        assert_eq!(game.last_room(), 1);
    }

    #[test]
    fn room_display_text_prefixes_non_literal() {
        let mut room = Room {
            description: "dismal swamp".into(),
            ..Room::default()
        };
        assert_eq!(room.display_text(), "I'm in a dismal swamp");
        room.is_literal = true;
        assert_eq!(room.display_text(), "dismal swamp");
    }

    #[test]
    fn treasure_display_restores_marker() {
        let item = Item {
            description: "GOLD COIN*".into(),
            is_treasure: true,
            ..Item::default()
        };
        assert_eq!(item.display_text(), "*GOLD COIN*");
    }

    #[test]
    fn footer_version_string() {
        let footer = Footer {
            version: 416,
            adventure: 1,
            magic: 0,
        };
        assert_eq!(footer.version_string(), "4.16");
    }

    #[test]
    fn cloned_game_shares_nothing() {
        let mut original = Game::default();
        original.items.push(Item {
            description: "lamp".into(),
            location: 3,
            ..Item::default()
        });
        let mut copy = original.clone();
        copy.items[0].location = CARRIED;
        assert_eq!(original.items[0].location, 3);
    }
}

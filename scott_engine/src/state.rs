//! Mutable play state that lives beside the current model.

use scott_data::Game;

/// Number of boolean flags a game can use.
pub const FLAG_COUNT: usize = 32;

/// Number of stored counters (and saved-room slots).
pub const COUNTER_COUNT: usize = 16;

/// Flag that makes the world dark.
pub const DARK_FLAG: i64 = 15;

/// Flag raised when the light source runs out.
pub const LIGHT_OUT_FLAG: i64 = 16;

/// Item index of the light source.
pub const LIGHT_SOURCE: usize = 9;

/// Everything about a running game that is not stored in the model itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Room the player is in.
    pub location: i64,
    pub flags: [bool; FLAG_COUNT],
    /// The current counter, tested by counter conditions.
    pub counter: i64,
    /// Stored counters, swapped with the current one by code 81.
    pub counters: [i64; COUNTER_COUNT],
    pub saved_room: i64,
    pub saved_rooms: [i64; COUNTER_COUNT],
    /// Turns of light left; negative never runs out.
    pub light_remaining: i64,
    pub game_over: bool,
}

impl GameState {
    /// Fresh state for a newly started game.
    pub fn new(game: &Game) -> Self {
        Self {
            location: game.header.starting_room,
            flags: [false; FLAG_COUNT],
            counter: 0,
            counters: [0; COUNTER_COUNT],
            saved_room: 0,
            saved_rooms: [0; COUNTER_COUNT],
            light_remaining: game.header.light_duration,
            game_over: false,
        }
    }

    /// Value of a flag. Flags outside the table read as unset.
    pub fn flag(&self, index: i64) -> bool {
        slot(index).and_then(|i| self.flags.get(i)).copied().unwrap_or(false)
    }

    /// Set or clear a flag. Flags outside the table are ignored.
    pub fn set_flag(&mut self, index: i64, value: bool) {
        if let Some(flag) = slot(index).and_then(|i| self.flags.get_mut(i)) {
            *flag = value;
        }
    }

    /// True when it is dark and the light source is neither carried nor here.
    pub fn is_dark(&self, game: &Game) -> bool {
        if !self.flag(DARK_FLAG) {
            return false;
        }
        match game.items.get(LIGHT_SOURCE) {
            Some(light) => !light.is_carried() && light.location != self.location,
            None => true,
        }
    }
}

/// Table slot for a stored index; negative indices have none.
pub(crate) fn slot(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}

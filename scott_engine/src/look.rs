//! `look` module
//!
//! Structured description of the player's surroundings. Formatting is left to
//! the caller.

use scott_data::{Direction, Game};

use crate::state::GameState;

/// What the player can see from where they stand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookData {
    pub is_dark: bool,
    /// Room text as shown to the player; empty when dark.
    pub room_description: String,
    /// Directions with an exit, in N, S, E, W, Up, Down order.
    pub exits: Vec<Direction>,
    /// Display text of the items in the room, in item order.
    pub items: Vec<String>,
}

/// Describe the player's current room.
pub fn look(game: &Game, state: &GameState) -> LookData {
    if state.is_dark(game) {
        return LookData {
            is_dark: true,
            ..LookData::default()
        };
    }
    let Some(room) = game.room(state.location) else {
        return LookData::default();
    };
    LookData {
        is_dark: false,
        room_description: room.display_text(),
        exits: Direction::ALL.into_iter().filter(|&d| room.exit(d) != 0).collect(),
        items: game
            .items
            .iter()
            .filter(|item| item.location == state.location)
            .map(scott_data::Item::display_text)
            .collect(),
    }
}

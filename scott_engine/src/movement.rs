//! `movement` module
//!
//! Handles `GO <direction>`, including the dangers of moving in the dark.

use log::info;
use scott_data::{Direction, Game};

use crate::session::Outcome;
use crate::state::{DARK_FLAG, GameState};

/// Resolve `GO <noun>`, or `None` when the noun is known but not a direction.
pub fn go_noun(game: &Game, state: &mut GameState, noun: Option<usize>) -> Option<Outcome> {
    match noun {
        None => Some(Outcome::NoDirection),
        Some(noun) => Direction::from_noun(noun).map(|direction| go(game, state, direction)),
    }
}

/// Move the player one step.
///
/// Walking into a wall in the dark is fatal: the player ends up in the last
/// room with the darkness flag cleared.
pub fn go(game: &Game, state: &mut GameState, direction: Direction) -> Outcome {
    let dark = state.is_dark(game);
    let destination = game.room(state.location).map_or(0, |room| room.exit(direction));

    match (dark, destination) {
        (true, 0) => {
            state.location = game.last_room();
            state.set_flag(DARK_FLAG, false);
            info!("player fell in the dark going {direction}, now in room {}", state.location);
            Outcome::DeadDark
        },
        (true, to) => {
            info!("player moved {direction} in the dark to room {to}");
            state.location = to;
            Outcome::DangerousDark
        },
        (false, 0) => Outcome::BadDirection,
        (false, to) => {
            info!("player moved {direction} to room {to}");
            state.location = to;
            Outcome::Success
        },
    }
}

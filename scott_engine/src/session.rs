//! A single play-through of a game.
//!
//! The decoded game is shared read-only behind an `Arc`; every session owns a
//! deep copy it is free to change. Several sessions over the same game never
//! see each other's changes.

use std::sync::Arc;

use log::info;
use scott_data::{Game, Item};
use variantly::Variantly;

use crate::command::{ParsedCommand, default_command, parse_command, word_length};
use crate::look::{LookData, look};
use crate::movement;
use crate::script::{self, Effect, ScriptContext};
use crate::state::{GameState, LIGHT_OUT_FLAG, LIGHT_SOURCE};
use crate::vocabulary::lookup;

/// Remaining light below which the player is warned.
pub const LIGHT_WARNING_TURNS: i64 = 25;

/// Result of interpreting a command. These are normal game responses, not
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum Outcome {
    Success,
    /// The verb is not in the dictionary, or nothing handles the command.
    Unknown,
    /// `GO` without a recognizable direction.
    NoDirection,
    /// No exit that way.
    BadDirection,
    /// Moved, but in the dark.
    DangerousDark,
    /// Walked into a wall in the dark and died.
    DeadDark,
    /// Actions exist for the command but none could run right now.
    Unsuccessful,
}

/// Everything that came out of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl From<Outcome> for Turn {
    fn from(outcome: Outcome) -> Self {
        Turn {
            outcome,
            effects: Vec::new(),
        }
    }
}

/// Light source news after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    RanOut,
    /// Turns of light left.
    Dimming(i64),
}

#[derive(Debug, Clone)]
pub struct Session {
    initial: Arc<Game>,
    current: Game,
    state: GameState,
    go_verb: Option<usize>,
}

impl Session {
    /// Begin a new play-through from the initial model.
    pub fn start(initial: Arc<Game>) -> Self {
        let current = (*initial).clone();
        let state = GameState::new(&current);
        let go_verb = lookup(&current.verbs, "GO", word_length(&current));
        info!("session started in room {}", state.location);
        Self {
            initial,
            current,
            state,
            go_verb,
        }
    }

    /// Throw away all progress and start over from the initial model.
    pub fn restart(&mut self) {
        info!("session restarted");
        *self = Session::start(Arc::clone(&self.initial));
    }

    /// The game as loaded.
    pub fn initial(&self) -> &Game {
        &self.initial
    }

    /// The game as changed by play so far.
    pub fn current(&self) -> &Game {
        &self.current
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn location(&self) -> i64 {
        self.state.location
    }

    pub fn is_dark(&self) -> bool {
        self.state.is_dark(&self.current)
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn resolve_command(&self, raw: &str) -> ParsedCommand {
        parse_command(&self.current, raw)
    }

    pub fn default_command(&self) -> ParsedCommand {
        default_command(&self.current)
    }

    /// Interpret movement only.
    ///
    /// `GO` with a direction moves (or fails to); `GO` with an unknown noun is
    /// `NoDirection`. Any other known command succeeds without changing
    /// anything, and an unknown verb is `Unknown`.
    pub fn execute(&mut self, command: &ParsedCommand) -> Outcome {
        let Some(verb) = command.verb else {
            return Outcome::Unknown;
        };
        if self.go_verb == Some(verb)
            && let Some(outcome) = movement::go_noun(&self.current, &mut self.state, command.noun)
        {
            return outcome;
        }
        Outcome::Success
    }

    /// Take a full turn: movement, then the game's action table, then the
    /// built-in take and drop.
    pub fn take_turn(&mut self, command: &ParsedCommand) -> Turn {
        let Some(verb) = command.verb else {
            return Outcome::Unknown.into();
        };
        if self.go_verb == Some(verb)
            && let Some(outcome) = movement::go_noun(&self.current, &mut self.state, command.noun)
        {
            return outcome.into();
        }

        let len = word_length(&self.current);
        let mut ctx = ScriptContext {
            initial: &self.initial,
            game: &mut self.current,
            state: &mut self.state,
            noun_text: &command.noun_text,
            effects: Vec::new(),
        };
        let outcome = if command.is_automatic() {
            script::run_automatic(&mut ctx);
            Outcome::Success
        } else {
            match script::run_command(&mut ctx, verb, command.noun) {
                Outcome::Unknown => script::builtin_take_drop(&mut ctx, verb, len).unwrap_or(Outcome::Unknown),
                other => other,
            }
        };
        Turn {
            outcome,
            effects: ctx.effects,
        }
    }

    pub fn look(&self) -> LookData {
        look(&self.current, &self.state)
    }

    /// Burn one turn of light if the light source is carried.
    pub fn advance_light(&mut self) -> Option<LightEvent> {
        let carried = self.current.items.get(LIGHT_SOURCE).is_some_and(Item::is_carried);
        if !carried || self.state.light_remaining <= 0 {
            return None;
        }
        self.state.light_remaining -= 1;
        match self.state.light_remaining {
            0 => {
                info!("light ran out");
                self.state.set_flag(LIGHT_OUT_FLAG, true);
                Some(LightEvent::RanOut)
            },
            left if left < LIGHT_WARNING_TURNS => Some(LightEvent::Dimming(left)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scott_data::{CARRIED, Header, Word};

    fn lamp_game(light_duration: i64) -> Arc<Game> {
        let mut items = vec![Item::default(); LIGHT_SOURCE + 1];
        items[LIGHT_SOURCE].location = CARRIED;
        Arc::new(Game {
            header: Header {
                word_length: 3,
                light_duration,
                ..Header::default()
            },
            verbs: vec![Word::new("AUT"), Word::new("GO")],
            nouns: vec![Word::new("ANY"), Word::new("NOR")],
            rooms: vec![Default::default()],
            items,
            ..Game::default()
        })
    }

    #[test]
    fn light_counts_down_and_runs_out() {
        let mut session = Session::start(lamp_game(26));
        assert_eq!(session.advance_light(), None);
        assert_eq!(session.advance_light(), Some(LightEvent::Dimming(24)));
        for _ in 0..23 {
            session.advance_light();
        }
        assert_eq!(session.advance_light(), Some(LightEvent::RanOut));
        assert!(session.state().flag(LIGHT_OUT_FLAG));
        assert_eq!(session.advance_light(), None);
    }

    #[test]
    fn negative_light_duration_never_runs_out() {
        let mut session = Session::start(lamp_game(-1));
        for _ in 0..100 {
            assert_eq!(session.advance_light(), None);
        }
    }

    #[test]
    fn unknown_verb_is_unknown() {
        let mut session = Session::start(lamp_game(0));
        let command = session.resolve_command("dance");
        assert_eq!(session.execute(&command), Outcome::Unknown);
        assert_eq!(session.take_turn(&command), Turn::from(Outcome::Unknown));
    }

    #[test]
    fn go_without_direction() {
        let mut session = Session::start(lamp_game(0));
        let command = session.resolve_command("go sideways");
        assert!(session.execute(&command).is_no_direction());
    }
}

//! Script module --
//!
//! Runs the game's action table. A typed command fires the first action whose
//! verb, noun and conditions match. The automatic verb (verb 0) instead gives
//! every automatic action its chance each turn.

pub mod action;
pub mod condition;

pub use action::{ActionKind, Flow, dispatch_action};
pub use condition::{World, condition_holds, conditions_hold, parameters};

use log::{debug, info};
use scott_data::{Action, CARRIED, Game};
use variantly::Variantly;

use crate::session::Outcome;
use crate::state::GameState;
use crate::vocabulary::same_word;

/// Verb index of the built-in take.
pub const TAKE_VERB: usize = 10;

/// Verb index of the built-in drop.
pub const DROP_VERB: usize = 18;

/// Something for the player to see as the result of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Effect {
    Message(String),
    Look,
    Inventory(Vec<String>),
    Score { stored: usize, total: i64 },
    GameOver,
    Died,
    TooHeavy,
    /// A built-in take or drop worked.
    Acknowledged,
    NotHere,
    NotCarried,
    ClearScreen,
    SaveRequested,
    Counter(i64),
    /// Raw text without a line break.
    Text(String),
    Newline,
    Delay,
}

/// Mutable access to a session while running actions.
#[derive(Debug)]
pub struct ScriptContext<'a> {
    /// The untouched model; its action table is the one that runs.
    pub initial: &'a Game,
    pub game: &'a mut Game,
    pub state: &'a mut GameState,
    /// Noun as typed, for the print-noun codes.
    pub noun_text: &'a str,
    pub effects: Vec<Effect>,
}

impl ScriptContext<'_> {
    fn world(&self) -> World<'_> {
        World {
            initial: self.initial,
            game: self.game,
            state: self.state,
        }
    }

    fn holds(&self, action: &Action) -> bool {
        conditions_hold(action, &self.world())
    }

    pub(crate) fn inventory_full(&self) -> bool {
        let carried = self.game.items.iter().filter(|i| i.is_carried()).count();
        let limit = self.game.header.max_inventory;
        limit >= 0 && i64::try_from(carried).is_ok_and(|c| c >= limit)
    }

    /// Treasures stored in the treasure room, and how many the game has.
    pub(crate) fn treasure_score(&self) -> (usize, i64) {
        let room = self.game.header.treasure_room;
        let stored = self
            .game
            .items
            .iter()
            .filter(|i| i.is_treasure && i.location == room)
            .count();
        (stored, self.game.header.num_treasures)
    }

    /// Run all codes of the action at `index`, then its follow-on actions if
    /// it asked to continue.
    fn fire(&mut self, index: usize) {
        let initial = self.initial;
        let actions = &initial.actions;
        if !self.run_codes(&actions[index]) {
            return;
        }
        for (offset, follow) in actions[index + 1..]
            .iter()
            .take_while(|a| a.verb == 0 && a.noun == 0)
            .enumerate()
        {
            if self.state.game_over {
                break;
            }
            if self.holds(follow) {
                debug!("continuing with action {}", index + 1 + offset);
                self.run_codes(follow);
            }
        }
    }

    /// Returns true when a continue code ran.
    fn run_codes(&mut self, action: &Action) -> bool {
        let mut params = parameters(action).into_iter();
        let mut continuing = false;
        for &code in &action.codes {
            match dispatch_action(self, ActionKind::from_code(code), &mut params) {
                Flow::Next => {},
                Flow::Continue => continuing = true,
                Flow::Stop => break,
            }
        }
        continuing
    }
}

/// Fire the first action matching `verb`/`noun` whose conditions hold.
///
/// An action noun of 0 matches any noun. Returns `Unsuccessful` when some
/// action named the command but none of them could run, and `Unknown` when no
/// action named it at all.
pub fn run_command(ctx: &mut ScriptContext<'_>, verb: usize, noun: Option<usize>) -> Outcome {
    let initial = ctx.initial;
    let mut named = false;
    for (index, action) in initial.actions.iter().enumerate() {
        let verb_matches = usize::try_from(action.verb).ok() == Some(verb);
        if !verb_matches || (action.noun != 0 && usize::try_from(action.noun).ok() != noun) {
            continue;
        }
        named = true;
        if ctx.holds(action) {
            info!("action {index} fired ({})", action.comment);
            ctx.fire(index);
            return Outcome::Success;
        }
    }
    if named { Outcome::Unsuccessful } else { Outcome::Unknown }
}

/// Give every automatic action its chance. The action noun is the percent
/// chance of it being considered this turn.
pub fn run_automatic(ctx: &mut ScriptContext<'_>) {
    let initial = ctx.initial;
    for (index, action) in initial.actions.iter().enumerate() {
        if ctx.state.game_over {
            break;
        }
        if action.verb != 0 || !roll(action.noun) || !ctx.holds(action) {
            continue;
        }
        debug!("automatic action {index} fired ({})", action.comment);
        ctx.fire(index);
    }
}

fn roll(percent: i64) -> bool {
    percent >= 100 || rand::random_range(0..100) < percent
}

/// Take or drop an item by its autograb noun. Returns `None` when no item
/// answers to the noun.
pub fn builtin_take_drop(ctx: &mut ScriptContext<'_>, verb: usize, word_length: usize) -> Option<Outcome> {
    if (verb != TAKE_VERB && verb != DROP_VERB) || ctx.noun_text.is_empty() {
        return None;
    }
    let here = ctx.state.location;
    let noun = ctx.noun_text;
    let named: Vec<usize> = ctx
        .game
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.autograb.as_deref().is_some_and(|w| same_word(w, noun, word_length)))
        .map(|(index, _)| index)
        .collect();
    if named.is_empty() {
        return None;
    }

    let effect = if verb == TAKE_VERB {
        match named.iter().find(|&&i| ctx.game.items[i].location == here) {
            None => Effect::NotHere,
            Some(_) if ctx.inventory_full() => Effect::TooHeavy,
            Some(&index) => {
                ctx.game.items[index].location = CARRIED;
                Effect::Acknowledged
            },
        }
    } else {
        match named.iter().find(|&&i| ctx.game.items[i].is_carried()) {
            None => Effect::NotCarried,
            Some(&index) => {
                ctx.game.items[index].location = here;
                Effect::Acknowledged
            },
        }
    };
    ctx.effects.push(effect);
    Some(Outcome::Success)
}

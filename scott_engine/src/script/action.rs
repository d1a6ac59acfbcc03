//! Action codes and what they do.
//!
//! Each action stores four codes, run in order once its conditions hold.
//! Codes that change the world mutate the session directly; codes that only
//! show something to the player become [`Effect`]s for the driver to render.
//!
//! Codes that take arguments pull them, in order, from the action's
//! `Parameter` conditions.

use log::{debug, warn};
use scott_data::{CARRIED, DESTROYED, Item};
use variantly::Variantly;

use super::{Effect, ScriptContext};
use crate::state::{COUNTER_COUNT, DARK_FLAG, LIGHT_OUT_FLAG, LIGHT_SOURCE, slot};

/// Decoded action code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum ActionKind {
    Nothing,
    /// Print a message by index.
    Message(i64),
    Get,
    Drop,
    Goto,
    Destroy,
    SetDark,
    ClearDark,
    SetFlag,
    ClearFlag,
    Die,
    PutItem,
    GameOver,
    Look,
    Score,
    Inventory,
    SetFlag0,
    ClearFlag0,
    RefillLamp,
    ClearScreen,
    Save,
    SwapItems,
    Continue,
    /// Get without the inventory limit.
    Superget,
    PutWith,
    DecrementCounter,
    PrintCounter,
    SetCounter,
    SwapRoom,
    SelectCounter,
    AddCounter,
    SubtractCounter,
    PrintNoun,
    PrintNounLine,
    Newline,
    SwapSavedRoom,
    Delay,
    Picture,
    Unrecognized(i64),
}

impl ActionKind {
    pub fn from_code(code: i64) -> ActionKind {
        #[allow(clippy::enum_glob_use)]
        use ActionKind::*;
        match code {
            0 => Nothing,
            1..=51 => Message(code),
            52 => Get,
            53 => Drop,
            54 => Goto,
            55 | 59 => Destroy,
            56 => SetDark,
            57 => ClearDark,
            58 => SetFlag,
            60 => ClearFlag,
            61 => Die,
            62 => PutItem,
            63 => GameOver,
            64 | 76 => Look,
            65 => Score,
            66 => Inventory,
            67 => SetFlag0,
            68 => ClearFlag0,
            69 => RefillLamp,
            70 => ClearScreen,
            71 => Save,
            72 => SwapItems,
            73 => Continue,
            74 => Superget,
            75 => PutWith,
            77 => DecrementCounter,
            78 => PrintCounter,
            79 => SetCounter,
            80 => SwapRoom,
            81 => SelectCounter,
            82 => AddCounter,
            83 => SubtractCounter,
            84 => PrintNoun,
            85 => PrintNounLine,
            86 => Newline,
            87 => SwapSavedRoom,
            88 => Delay,
            89 => Picture,
            102..=149 => Message(code - 50),
            other => Unrecognized(other),
        }
    }
}

/// What to do with the rest of an action's codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Next,
    /// Skip the remaining codes of this action.
    Stop,
    /// Keep going, and run the follow-on actions afterwards.
    Continue,
}

/// Apply one action code.
pub fn dispatch_action(ctx: &mut ScriptContext<'_>, kind: ActionKind, params: &mut impl Iterator<Item = i64>) -> Flow {
    #[allow(clippy::enum_glob_use)]
    use ActionKind::*;
    let mut param = || params.next().unwrap_or_default();

    match kind {
        Nothing => {},
        Message(index) => show_message(ctx, index),
        Get => {
            let item = param();
            if ctx.inventory_full() {
                ctx.effects.push(Effect::TooHeavy);
                return Flow::Stop;
            }
            set_item_location(ctx, item, CARRIED);
        },
        Superget => {
            let item = param();
            set_item_location(ctx, item, CARRIED);
        },
        Drop => {
            let item = param();
            let here = ctx.state.location;
            set_item_location(ctx, item, here);
        },
        Goto => ctx.state.location = param(),
        Destroy => {
            let item = param();
            set_item_location(ctx, item, DESTROYED);
        },
        SetDark => ctx.state.set_flag(DARK_FLAG, true),
        ClearDark => ctx.state.set_flag(DARK_FLAG, false),
        SetFlag => {
            let flag = param();
            ctx.state.set_flag(flag, true);
        },
        ClearFlag => {
            let flag = param();
            ctx.state.set_flag(flag, false);
        },
        SetFlag0 => ctx.state.set_flag(0, true),
        ClearFlag0 => ctx.state.set_flag(0, false),
        Die => {
            debug!("player died in room {}", ctx.state.location);
            ctx.state.location = ctx.game.last_room();
            ctx.state.set_flag(DARK_FLAG, false);
            ctx.effects.push(Effect::Died);
        },
        PutItem => {
            let item = param();
            let room = param();
            set_item_location(ctx, item, room);
        },
        PutWith => {
            let item = param();
            let other = param();
            if let Some(location) = slot(other).and_then(|i| ctx.game.items.get(i)).map(|i| i.location) {
                set_item_location(ctx, item, location);
            }
        },
        SwapItems => {
            let len = ctx.game.items.len();
            let a = slot(param()).filter(|&a| a < len);
            let b = slot(param()).filter(|&b| b < len);
            if let (Some(a), Some(b)) = (a, b) {
                let first = ctx.game.items[a].location;
                ctx.game.items[a].location = ctx.game.items[b].location;
                ctx.game.items[b].location = first;
            }
        },
        GameOver => {
            ctx.state.game_over = true;
            ctx.effects.push(Effect::GameOver);
            return Flow::Stop;
        },
        Look => ctx.effects.push(Effect::Look),
        Score => {
            let (stored, total) = ctx.treasure_score();
            ctx.effects.push(Effect::Score { stored, total });
            if total > 0 && i64::try_from(stored).is_ok_and(|s| s >= total) {
                ctx.state.game_over = true;
                ctx.effects.push(Effect::GameOver);
                return Flow::Stop;
            }
        },
        Inventory => {
            let carried = ctx.game.items.iter().filter(|i| i.is_carried()).map(Item::display_text).collect();
            ctx.effects.push(Effect::Inventory(carried));
        },
        RefillLamp => {
            ctx.state.light_remaining = ctx.game.header.light_duration;
            ctx.state.set_flag(LIGHT_OUT_FLAG, false);
            match ctx.game.items.get_mut(LIGHT_SOURCE) {
                Some(lamp) => lamp.location = CARRIED,
                None => warn!("light source {LIGHT_SOURCE} does not exist"),
            }
        },
        ClearScreen => ctx.effects.push(Effect::ClearScreen),
        Save => ctx.effects.push(Effect::SaveRequested),
        Continue => return Flow::Continue,
        DecrementCounter => {
            if ctx.state.counter >= 0 {
                ctx.state.counter -= 1;
            }
        },
        PrintCounter => ctx.effects.push(Effect::Counter(ctx.state.counter)),
        SetCounter => ctx.state.counter = param(),
        AddCounter => ctx.state.counter = ctx.state.counter.saturating_add(param()),
        SubtractCounter => {
            ctx.state.counter = ctx.state.counter.saturating_sub(param()).max(-1);
        },
        SelectCounter => {
            let index = param();
            if let Some(stored) = slot(index).and_then(|i| ctx.state.counters.get_mut(i)) {
                std::mem::swap(&mut ctx.state.counter, stored);
            } else {
                warn!("counter {index} is outside the {COUNTER_COUNT} stored counters");
            }
        },
        SwapRoom => std::mem::swap(&mut ctx.state.location, &mut ctx.state.saved_room),
        SwapSavedRoom => {
            let index = param();
            if let Some(saved) = slot(index).and_then(|i| ctx.state.saved_rooms.get_mut(i)) {
                std::mem::swap(&mut ctx.state.location, saved);
            } else {
                warn!("saved room {index} is outside the {COUNTER_COUNT} slots");
            }
        },
        PrintNoun => ctx.effects.push(Effect::Text(ctx.noun_text.to_string())),
        PrintNounLine => {
            ctx.effects.push(Effect::Text(ctx.noun_text.to_string()));
            ctx.effects.push(Effect::Newline);
        },
        Newline => ctx.effects.push(Effect::Newline),
        Delay => ctx.effects.push(Effect::Delay),
        Picture => {
            let _picture = param();
        },
        Unrecognized(code) => warn!("ignoring unrecognized action code {code}"),
    }
    Flow::Next
}

fn show_message(ctx: &mut ScriptContext<'_>, index: i64) {
    match slot(index).and_then(|i| ctx.game.messages.get(i)) {
        Some(text) => ctx.effects.push(Effect::Message(text.clone())),
        None => warn!("message {index} does not exist"),
    }
}

fn set_item_location(ctx: &mut ScriptContext<'_>, index: i64, location: i64) {
    match slot(index).and_then(|i| ctx.game.items.get_mut(i)) {
        Some(item) => item.location = location,
        None => warn!("item {index} does not exist"),
    }
}

//! The read-eval-print loop.
//!
//! Each pass runs the automatic actions, shows what happened, then reads one
//! command and takes a turn with it. The loop ends when the game is over, the
//! player types `QUIT`, or input runs out.

pub mod input;

pub use input::{InputEvent, InputManager};

use anyhow::{Context, Result};
use log::info;

use crate::config::EngineConfig;
use crate::script::Effect;
use crate::session::Session;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};

/// Control flow signal from a single line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the loop until the game ends or input is exhausted.
///
/// # Errors
/// Fails only when reading input or writing the prompt fails.
pub fn run_repl(session: &mut Session, config: &EngineConfig, input: &mut InputManager) -> Result<()> {
    let mut view = View::new(config.display.width);
    view.push(ViewItem::Scene(session.look()));

    let mut turn = 0_u64;
    loop {
        if config.play.ambient_each_turn {
            run_ambient(session, &mut view);
        }
        view.flush();
        if session.is_over() {
            info!("game over after {turn} turns");
            break;
        }

        turn += 1;
        info!("================> BEGIN TURN {turn} <================");
        let Some(line) = read_command(input, &mut view)? else {
            info!("input closed");
            break;
        };
        if play_line(session, config, &mut view, &line) == ReplControl::Quit {
            view.flush();
            break;
        }
    }
    Ok(())
}

/// Prompt until a line arrives. `None` means input is closed.
fn read_command(input: &mut InputManager, view: &mut View) -> Result<Option<String>> {
    let prompt = "Tell me what to do ? ".prompt_style().to_string();
    loop {
        println!();
        match input.read_line(&prompt).context("reading command")? {
            InputEvent::Line(line) => return Ok(Some(line)),
            InputEvent::Eof => return Ok(None),
            InputEvent::Interrupted => {
                view.push(ViewItem::Notice("Command canceled.".into()));
                view.flush();
            },
        }
    }
}

/// Interpret one line of input, queueing the response on `view`.
pub fn play_line(session: &mut Session, config: &EngineConfig, view: &mut View, line: &str) -> ReplControl {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplControl::Continue;
    }
    if trimmed.eq_ignore_ascii_case("quit") {
        view.push(ViewItem::Notice("Bye.".into()));
        return ReplControl::Quit;
    }

    let command = session.resolve_command(trimmed);
    info!(
        "command '{}' '{}' -> verb {:?} noun {:?}",
        command.verb_text, command.noun_text, command.verb, command.noun
    );
    let before = session.location();
    let turn = session.take_turn(&command);
    view.push_turn(&command, &turn, session);

    let looked = turn.effects.iter().any(Effect::is_look);
    if config.play.auto_look && !looked && !session.is_over() && session.location() != before {
        view.push(ViewItem::Scene(session.look()));
    }

    if let Some(event) = session.advance_light()
        && config.play.light_warnings
    {
        view.push_light(event);
    }
    ReplControl::Continue
}

/// Run the automatic actions once.
pub fn run_ambient(session: &mut Session, view: &mut View) {
    let command = session.default_command();
    if !command.is_automatic() {
        return;
    }
    let turn = session.take_turn(&command);
    view.push_effects(&turn.effects, session);
}

//! View module.
//! Rather than printing from each step of a turn, the driver collects what the
//! player should see into a [`View`] and displays it once the turn is over.

use std::thread;
use std::time::Duration;

use log::info;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::command::ParsedCommand;
use crate::look::LookData;
use crate::script::Effect;
use crate::session::{LightEvent, Outcome, Session, Turn};
use crate::style::GameStyle;

/// Pause requested by the delay action.
pub const DELAY: Duration = Duration::from_secs(2);

/// One piece of output.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    Scene(LookData),
    /// Text from the game's own messages.
    GameText(String),
    /// Text continuing the current line.
    Inline(String),
    LineBreak,
    /// Engine responses such as "O.K.".
    Notice(String),
    Warning(String),
    Error(String),
    Inventory(Vec<String>),
    ClearScreen,
}

/// Output collected over one turn.
#[derive(Debug, Clone)]
pub struct View {
    /// Wrap width; 0 follows the terminal.
    pub width: usize,
    pub items: Vec<ViewItem>,
    /// Pause after the next flush.
    pub pause: bool,
}

impl View {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            items: Vec::new(),
            pause: false,
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Queue the response to a command.
    pub fn push_turn(&mut self, command: &ParsedCommand, turn: &Turn, session: &Session) {
        match turn.outcome {
            Outcome::Success => {},
            Outcome::Unknown if command.verb.is_none() => {
                self.push(ViewItem::Error("You use word(s) I don't know!".into()));
            },
            Outcome::Unknown => self.push(ViewItem::Error("I don't understand your command.".into())),
            Outcome::NoDirection => self.push(ViewItem::Notice("Give me a direction too.".into())),
            Outcome::BadDirection => self.push(ViewItem::Notice("You can't go in that direction.".into())),
            Outcome::DangerousDark => self.push(ViewItem::Warning("Dangerous to move in the dark!".into())),
            Outcome::DeadDark => self.push(ViewItem::Warning("I fell down and broke my neck.".into())),
            Outcome::Unsuccessful => self.push(ViewItem::Notice("I can't do that yet.".into())),
        }
        self.push_effects(&turn.effects, session);
    }

    /// Queue the visible results of actions.
    pub fn push_effects(&mut self, effects: &[Effect], session: &Session) {
        for effect in effects {
            let item = match effect {
                Effect::Message(text) => ViewItem::GameText(text.clone()),
                Effect::Look => ViewItem::Scene(session.look()),
                Effect::Inventory(items) => ViewItem::Inventory(items.clone()),
                Effect::Score { stored, total } => ViewItem::Notice(score_text(*stored, *total)),
                Effect::GameOver => ViewItem::Warning("The game is now over.".into()),
                Effect::Died => ViewItem::Warning("I'm dead...".into()),
                Effect::TooHeavy => ViewItem::Notice("I've too much to carry!".into()),
                Effect::Acknowledged => ViewItem::Notice("O.K.".into()),
                Effect::NotHere => ViewItem::Notice("I don't see it here.".into()),
                Effect::NotCarried => ViewItem::Notice("I'm not carrying it.".into()),
                Effect::ClearScreen => ViewItem::ClearScreen,
                Effect::SaveRequested => ViewItem::Error("Saving is not supported.".into()),
                Effect::Counter(value) => ViewItem::Inline(format!("{value} ")),
                Effect::Text(text) => ViewItem::Inline(text.clone()),
                Effect::Newline => ViewItem::LineBreak,
                Effect::Delay => {
                    self.pause = true;
                    continue;
                },
            };
            self.push(item);
        }
    }

    pub fn push_light(&mut self, event: LightEvent) {
        let text = match event {
            LightEvent::RanOut => "Light has run out!".to_string(),
            LightEvent::Dimming(turns) => format!("Light runs out in {turns} turns."),
        };
        self.push(ViewItem::Warning(text));
    }

    /// Compose everything queued so far.
    pub fn render(&self) -> String {
        let width = if self.width == 0 { termwidth() } else { self.width };
        let mut out = String::new();
        let mut inline = false;
        for item in &self.items {
            if inline && !item.is_inline() {
                out.push('\n');
                inline = false;
            }
            match item {
                ViewItem::Scene(data) => render_scene(&mut out, data, width),
                ViewItem::GameText(text) => push_line(&mut out, &fill(text, width).message_style().to_string()),
                ViewItem::Inline(text) => {
                    out.push_str(text);
                    inline = true;
                },
                ViewItem::LineBreak => out.push('\n'),
                ViewItem::Notice(text) => push_line(&mut out, text),
                ViewItem::Warning(text) => push_line(&mut out, &text.warning_style().to_string()),
                ViewItem::Error(text) => push_line(&mut out, &text.error_style().to_string()),
                ViewItem::Inventory(items) => render_inventory(&mut out, items, width),
                ViewItem::ClearScreen => out.push_str("\x1B[2J\x1B[H"),
            }
        }
        if inline {
            out.push('\n');
        }
        out
    }

    /// Display everything queued and start the next turn empty.
    pub fn flush(&mut self) {
        let out = self.render();
        if !out.is_empty() {
            print!("{out}");
        }
        info!("view flushed {} items", self.items.len());
        self.items.clear();
        if self.pause {
            self.pause = false;
            thread::sleep(DELAY);
        }
    }
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn render_scene(out: &mut String, data: &LookData, width: usize) {
    if data.is_dark {
        push_line(out, &"I can't see. It is too dark!".warning_style().to_string());
        return;
    }
    push_line(out, &fill(&data.room_description, width).room_style().to_string());

    let exits = if data.exits.is_empty() {
        "None".to_string()
    } else {
        data.exits.iter().map(|d| d.name().exit_style().to_string()).collect::<Vec<_>>().join(", ")
    };
    push_line(out, &format!("{} {exits}", "Obvious exits:".subheading_style()));

    if !data.items.is_empty() {
        let listed = data
            .items
            .iter()
            .map(|item| {
                if item.starts_with('*') {
                    item.treasure_style().to_string()
                } else {
                    item.item_style().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" - ");
        push_line(out, &format!("{} {listed}", "I can also see:".subheading_style()));
    }
}

fn render_inventory(out: &mut String, items: &[String], width: usize) {
    let listed = if items.is_empty() {
        "Nothing at all.".to_string()
    } else {
        items.join(" - ")
    };
    push_line(out, &fill(&format!("I'm carrying: {listed}"), width));
}

fn score_text(stored: usize, total: i64) -> String {
    let stored_i = i64::try_from(stored).unwrap_or(i64::MAX);
    let rating = if total > 0 { stored_i.saturating_mul(100) / total } else { 0 };
    format!("I've stored {stored} treasures. On a scale of 0 to 100, that rates {rating}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scott_data::Direction;

    fn plain_view() -> View {
        colored::control::set_override(false);
        View::new(40)
    }

    #[test]
    fn scene_lists_exits_and_items() {
        let mut view = plain_view();
        view.push(ViewItem::Scene(LookData {
            is_dark: false,
            room_description: "I'm in a forest".into(),
            exits: vec![Direction::North, Direction::Down],
            items: vec!["Trees".into(), "*Gold*".into()],
        }));
        assert_eq!(
            view.render(),
            "I'm in a forest\nObvious exits: North, Down\nI can also see: Trees - *Gold*\n"
        );
    }

    #[test]
    fn room_without_exits_says_none() {
        let mut view = plain_view();
        view.push(ViewItem::Scene(LookData {
            is_dark: false,
            room_description: "I'm in Limbo".into(),
            exits: Vec::new(),
            items: Vec::new(),
        }));
        assert_eq!(view.render(), "I'm in Limbo\nObvious exits: None\n");
    }

    #[test]
    fn dark_scene_says_so() {
        let mut view = plain_view();
        view.push(ViewItem::Scene(LookData {
            is_dark: true,
            ..LookData::default()
        }));
        assert_eq!(view.render(), "I can't see. It is too dark!\n");
    }

    #[test]
    fn inline_text_ends_its_line_before_other_output() {
        let mut view = plain_view();
        view.push(ViewItem::Inline("LAMP".into()));
        view.push(ViewItem::Notice("O.K.".into()));
        view.push(ViewItem::Inline("3 ".into()));
        assert_eq!(view.render(), "LAMP\nO.K.\n3 \n");
    }

    #[test]
    fn long_messages_wrap() {
        let mut view = plain_view();
        view.push(ViewItem::GameText(
            "The old man looks at you and mutters something about a bridge.".into(),
        ));
        assert!(view.render().lines().all(|line| line.len() <= 40));
    }

    #[test]
    fn score_rating_handles_zero_treasures() {
        assert_eq!(score_text(2, 4), "I've stored 2 treasures. On a scale of 0 to 100, that rates 50.");
        assert!(score_text(0, 0).ends_with("rates 0."));
    }
}

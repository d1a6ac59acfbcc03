#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const SCOTT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod loader;
pub mod look;
pub mod movement;
pub mod repl;
pub mod script;
pub mod session;
pub mod state;
pub mod style;
pub mod view;
pub mod vocabulary;

// Re-exports for convenience
pub use command::ParsedCommand;
pub use config::{EngineConfig, load_config};
pub use loader::{load_game, load_game_file, round_trip_mismatch};
pub use look::LookData;
pub use repl::{InputEvent, InputManager, run_repl};
pub use script::Effect;
pub use session::{LightEvent, Outcome, Session, Turn};
pub use state::GameState;
pub use view::{View, ViewItem};

//! Loader for ScottFree data files.
//!
//! Bytes are decoded by `scott_codec` and then checked for internal
//! consistency before a session may use them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use scott_data::Game;

/// Decode and validate a game from raw bytes.
///
/// # Errors
/// Decoding failures (with the phase and element that failed) and every
/// consistency problem found in the decoded model, reported together.
pub fn load_game(bytes: &[u8]) -> Result<Game> {
    let game = scott_codec::decode(bytes).context("while decoding game data")?;
    validate_game(&game)?;
    info!("{} rooms loaded", game.rooms.len());
    info!("{} items loaded", game.items.len());
    info!("{} actions loaded", game.actions.len());
    info!("{} words and {} messages loaded", game.verbs.len(), game.messages.len());
    info!(
        "adventure {} version {}",
        game.footer.adventure,
        game.footer.version_string()
    );
    Ok(game)
}

/// Read a data file and load it.
///
/// # Errors
/// File IO errors, plus everything [`load_game`] reports.
pub fn load_game_file(path: &Path) -> Result<Game> {
    let bytes = fs::read(path).with_context(|| format!("reading game data from '{}'", path.display()))?;
    load_game(&bytes).with_context(|| format!("loading '{}'", path.display()))
}

/// Decode `bytes` and encode the result again.
///
/// Returns the 1-based line of the first difference, or `None` when the data
/// survives the round trip byte for byte. No validation is applied.
///
/// # Errors
/// The data cannot be decoded, or the decoded game cannot be encoded.
pub fn round_trip_mismatch(bytes: &[u8]) -> Result<Option<usize>> {
    let game = scott_codec::decode(bytes).context("while decoding game data")?;
    let encoded = scott_codec::encode(&game).context("while encoding game data")?;
    Ok(first_difference(bytes, &encoded))
}

fn first_difference(left: &[u8], right: &[u8]) -> Option<usize> {
    if left == right {
        return None;
    }
    let mut left_lines = left.split(|&b| b == b'\n');
    let mut right_lines = right.split(|&b| b == b'\n');
    let mut line = 1;
    loop {
        match (left_lines.next(), right_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            _ => return Some(line),
        }
    }
}

/// Validate the decoded game and return a single aggregated error.
fn validate_game(game: &Game) -> Result<()> {
    let errors = scott_data::validate_game(game);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("game validation failed:\n{details}");
}

#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Scott **
//! Player and checker for ScottFree adventure data files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;

use scott_engine::style::{GameStyle, set_color};
use scott_engine::{InputManager, SCOTT_VERSION, Session, load_config, load_game_file, round_trip_mismatch, run_repl};

#[derive(Parser)]
#[command(author, version, about = "Play and inspect Scott Adams adventures in ScottFree format.")]
struct Cli {
    /// Config file to use instead of the usual lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game.
    Play {
        /// Path to a ScottFree data file.
        game: PathBuf,
    },
    /// Check that a data file decodes and re-encodes to the same bytes.
    Verify { game: PathBuf },
    /// Show a summary of a data file.
    Info { game: PathBuf },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { game } => play(cli.config.as_deref(), &game),
        Commands::Verify { game } => verify(&game),
        Commands::Info { game } => info_cmd(&game),
    }
}

fn play(config: Option<&Path>, path: &Path) -> Result<ExitCode> {
    let config = load_config(config).context("while loading config")?;
    set_color(config.display.color);
    info!("Start: loading game from '{}'...", path.display());
    let game = load_game_file(path)?;

    println!(
        "{}",
        format!("SCOTT {SCOTT_VERSION}: adventure {} (v{})", game.footer.adventure, game.footer.version_string())
            .bright_yellow()
            .underline()
    );
    let mut session = Session::start(Arc::new(game));
    run_repl(&mut session, &config, &mut InputManager::new())?;
    Ok(ExitCode::SUCCESS)
}

fn verify(path: &Path) -> Result<ExitCode> {
    let bytes = fs::read(path).with_context(|| format!("reading game data from '{}'", path.display()))?;
    match round_trip_mismatch(&bytes).with_context(|| format!("verifying '{}'", path.display()))? {
        None => {
            println!("{}: round trip OK ({} bytes)", path.display(), bytes.len());
            Ok(ExitCode::SUCCESS)
        },
        Some(line) => {
            println!(
                "{}",
                format!("{}: re-encoded data differs from line {line}", path.display()).error_style()
            );
            Ok(ExitCode::FAILURE)
        },
    }
}

fn info_cmd(path: &Path) -> Result<ExitCode> {
    let game = load_game_file(path)?;
    let header = &game.header;
    println!("{}", path.display().to_string().subheading_style());
    println!("adventure     {}", game.footer.adventure);
    println!("version       {}", game.footer.version_string());
    println!("rooms         {}", game.rooms.len());
    println!("items         {}", game.items.len());
    println!("actions       {}", game.actions.len());
    println!("words         {} verbs, {} nouns", game.verbs.len(), game.nouns.len());
    println!("messages      {}", game.messages.len());
    println!("treasures     {} (stored in room {})", header.num_treasures, header.treasure_room);
    println!("carry limit   {}", header.max_inventory);
    println!("word length   {}", header.word_length);
    println!("light         {} turns", header.light_duration);
    Ok(ExitCode::SUCCESS)
}

//! Terminal mine-clearing game.
//!
//! Plays on stdin/stdout, keeps finished games in a JSON file and can replay them move by move.

use std::io;

use anyhow::Result;
use clap::Parser;

use config::{Args, Command};
use console::Console;
use store::GameStore;

mod command;
mod config;
mod console;
mod help;
mod menu;
mod play;
mod recorder;
mod render;
mod replay;
mod store;

fn main() -> Result<()> {
    let args = Args::parse();
    config::init_logging(&args.verbose)?;

    let store = GameStore::new(args.data_path());
    log::debug!("Using store at {}", store.path().display());
    let options = args.options();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    match &args.command {
        None => menu::run(&mut console, &store, &options),
        Some(Command::Play(preset)) => play::new_game(&mut console, &store, preset, &options),
        Some(Command::List) => menu::list_games(&mut console, &store),
        Some(Command::Replay { id }) => {
            replay::replay_by_id(&mut console, &store, *id, &options).map(|_| ())
        }
    }
}

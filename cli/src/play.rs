use std::io::{BufRead, Write};

use anyhow::Result;
use mineclear_core::*;

use crate::command::GameCommand;
use crate::config::{Options, PlayArgs};
use crate::console::Console;
use crate::help;
use crate::recorder::GameLog;
use crate::render::render;
use crate::store::GameStore;

const MOVE_PROMPT: &str = "Enter action (o row col - open, f row col - flag, h - help, q - quit): ";
const DEFAULT_PLAYER: &str = "Player";

#[derive(Clone, Debug, PartialEq)]
pub struct GameSettings {
    pub player: String,
    pub config: GameConfig,
}

/// Collects player name, board size and mine count, taking whatever the command line already gave.
pub fn ask_settings<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    preset: &PlayArgs,
) -> Result<Option<GameSettings>> {
    let player = match &preset.name {
        Some(name) => name.clone(),
        None => match console.prompt("Enter your name: ")? {
            Some(name) => name,
            None => return Ok(None),
        },
    };
    let player = if player.trim().is_empty() {
        DEFAULT_PLAYER.to_string()
    } else {
        player.trim().to_string()
    };

    let size = match preset.size.filter(|&size| size >= MIN_SIDE) {
        Some(size) => size,
        None => {
            let question = format!("Enter board size ({MIN_SIDE} to {}): ", Coord::MAX);
            let complaint = format!("Size must be between {MIN_SIDE} and {}!", Coord::MAX);
            match console.prompt_number::<Coord>(&question, &complaint, |&size| size >= MIN_SIDE)? {
                Some(size) => size,
                None => return Ok(None),
            }
        }
    };

    let max_mines = mult(size, size) - 1;
    let valid_mines = |mines: &CellCount| (1..=max_mines).contains(mines);
    let mines = match preset.mines.filter(valid_mines) {
        Some(mines) => mines,
        None => {
            if let Some(mines) = preset.mines {
                log::warn!("Ignoring mine count {} for a {}x{} board", mines, size, size);
            }
            let question = format!("Enter number of mines (1 to {max_mines}): ");
            let complaint = format!("Number of mines must be between 1 and {max_mines}!");
            match console.prompt_number::<CellCount>(&question, &complaint, valid_mines)? {
                Some(mines) => mines,
                None => return Ok(None),
            }
        }
    };

    Ok(Some(GameSettings {
        player,
        config: GameConfig::square(size, mines)?,
    }))
}

/// Runs the command loop until the game is won, lost or abandoned. Returns the result of a finished game.
pub fn play<R: BufRead, W: Write, Rec: Recorder>(
    console: &mut Console<R, W>,
    session: &mut Session<Rec>,
    color: bool,
) -> Result<Option<GameResult>> {
    loop {
        render(console.out(), &session.snapshot(), color)?;

        let Some(line) = console.prompt(MOVE_PROMPT)? else {
            return Ok(None);
        };
        let command = match GameCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                console.say(err.to_string())?;
                continue;
            }
        };

        match command {
            GameCommand::Help => help::show(console.out())?,
            GameCommand::Quit => return Ok(None),
            GameCommand::Open(coords) | GameCommand::Flag(coords)
                if !session.board().contains(coords) =>
            {
                let (rows, cols) = session.board().size();
                console.say(format!(
                    "Coordinates outside the board! Rows go from 0 to {}, columns from 0 to {}.",
                    rows - 1,
                    cols - 1
                ))?;
            }
            GameCommand::Open(coords) => {
                session.open(coords)?;
            }
            GameCommand::Flag(coords) => {
                if !session.toggle_flag(coords)?.has_update() {
                    console.say("An open cell cannot be flagged.")?;
                }
            }
        }

        if let Some(result) = session.state().result() {
            render(console.out(), &session.snapshot(), color)?;
            match result {
                GameResult::Won => console.say("Congratulations! You opened every safe cell!")?,
                GameResult::Lost => console.say("You stepped on a mine! Game over.")?,
            }
            return Ok(Some(result));
        }
    }
}

/// A whole new game: settings, play, and saving the finished game.
pub fn new_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &GameStore,
    preset: &PlayArgs,
    options: &Options,
) -> Result<()> {
    console.say("=== NEW GAME ===")?;
    let Some(settings) = ask_settings(console, preset)? else {
        return Ok(());
    };

    let seed = options.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    let board = Board::generate(settings.config, RandomLayoutGenerator::new(seed));
    let mut session = Session::new(board, settings.player, GameLog::new());

    if play(console, &mut session, options.color)?.is_none() {
        console.say("Game abandoned, it will not be saved.")?;
        return Ok(());
    }

    let Some(record) = session.into_recorder().into_record() else {
        return Ok(());
    };
    match store.append(record) {
        Ok(id) => console.say(format!("Game saved as #{id}."))?,
        Err(err) => {
            log::error!("Saving game failed: {:#}", err);
            console.say(format!("Could not save the game: {err:#}"))?;
        }
    }
    Ok(())
}

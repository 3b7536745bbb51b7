use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;

use crate::config::{Options, PlayArgs};
use crate::console::Console;
use crate::play::new_game;
use crate::replay::replay_by_id;
use crate::store::{GameRecord, GameStore};

const HEADERS: [&str; 6] = ["ID", "Player", "Date", "Size", "Mines", "Result"];

fn show_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say("=== MAIN MENU ===")?;
    console.say("1. New game")?;
    console.say("2. Saved games")?;
    console.say("3. Replay a game")?;
    console.say("4. Quit")?;
    console.say("")
}

/// Interactive main menu, until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &GameStore,
    options: &Options,
) -> Result<()> {
    console.say("Welcome to mineclear!")?;
    console.say("During a game, enter 'h' to see the rules.")?;
    console.say("")?;

    loop {
        show_menu(console)?;
        let Some(choice) = console.prompt("Choose a mode (1-4): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => new_game(console, store, &PlayArgs::default(), options)?,
            "2" => {
                if let Err(err) = list_games(console, store) {
                    log::error!("Listing games failed: {:#}", err);
                    console.say(format!("Could not list saved games: {err:#}"))?;
                }
            }
            "3" => {
                console.say("=== REPLAY ===")?;
                let Some(answer) = console.prompt("Enter the id of the game to replay: ")? else {
                    return Ok(());
                };
                match answer.parse::<u64>() {
                    Ok(id) if id > 0 => {
                        if let Err(err) = replay_by_id(console, store, id, options) {
                            log::error!("Replaying game {} failed: {:#}", id, err);
                            console.say(format!("Could not replay game #{id}: {err:#}"))?;
                        }
                    }
                    _ => console.say("Invalid game id!")?,
                }
            }
            "4" | "q" => return Ok(()),
            _ => console.say("Invalid choice. Try again.")?,
        }
    }
}

fn table_row(game: &GameRecord) -> [String; 6] {
    [
        game.id.to_string(),
        game.player.clone(),
        game.played_at.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string(),
        format!("{}x{}", game.rows, game.cols),
        game.mine_count.to_string(),
        game.result.as_str().to_string(),
    ]
}

/// Prints every saved game as a table, newest first.
pub fn list_games<R: BufRead, W: Write>(console: &mut Console<R, W>, store: &GameStore) -> Result<()> {
    console.say("=== SAVED GAMES ===")?;

    let games = store.list()?;
    if games.is_empty() {
        console.say("No saved games found.")?;
        return console.say("");
    }

    let rows: Vec<[String; 6]> = games.iter().map(table_row).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, column) in widths.iter_mut().zip(row) {
            *width = (*width).max(column.chars().count());
        }
    }
    let widths = widths.map(|width| width + 2);

    let format_row = |columns: &[&str]| -> String {
        columns
            .iter()
            .zip(widths)
            .map(|(column, width)| format!("{column:<width$}"))
            .collect::<String>()
            .trim_end()
            .to_string()
    };

    console.say(format_row(&HEADERS))?;
    console.say("-".repeat(widths.iter().sum()))?;
    for row in &rows {
        let columns: Vec<&str> = row.iter().map(String::as_str).collect();
        console.say(format_row(&columns))?;
    }
    console.say("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::tests::{console, output};
    use crate::store::tests::record;
    use chrono::{TimeZone, Utc};

    const OPTIONS: Options = Options {
        seed: Some(3),
        pause: false,
        color: false,
    };

    #[test]
    fn empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path().join("games.json"));
        let mut console = console("");

        list_games(&mut console, &store).unwrap();

        assert!(output(console).contains("No saved games found."));
    }

    #[test]
    fn list_aligns_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path().join("games.json"));
        store
            .append(record("anastasia", Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()))
            .unwrap();
        store
            .append(record("bo", Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()))
            .unwrap();
        let mut console = console("");

        list_games(&mut console, &store).unwrap();

        let text = output(console);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("ID  Player     Date"), "{:?}", lines[1]);
        assert!(lines[3].starts_with("2   bo         "), "{:?}", lines[3]);
        assert!(lines[4].starts_with("1   anastasia  "), "{:?}", lines[4]);
        assert!(lines[4].ends_with("2x2   1      lost"), "{:?}", lines[4]);
    }

    #[test]
    fn menu_plays_lists_and_quits() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path().join("games.json"));
        let mut console = console("7\n1\nann\n2\n3\no 0 0\n2\n3\nx\n3\n1\n4\n");

        run(&mut console, &store, &OPTIONS).unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
        let text = output(console);
        assert!(text.contains("Invalid choice. Try again."));
        assert!(text.contains("Game saved as #1."));
        assert!(text.contains("=== SAVED GAMES ==="));
        assert!(text.contains("Invalid game id!"));
        assert!(text.contains("=== Replay of game #1 ==="));
        assert!(text.contains("=== Replay finished ==="));
    }

    #[test]
    fn unreadable_store_keeps_the_menu_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        std::fs::write(&path, "not json").unwrap();
        let store = GameStore::new(path);
        let mut console = console("2\n3\n1\n7\n4\n");

        run(&mut console, &store, &OPTIONS).unwrap();

        let text = output(console);
        assert!(text.contains("Could not list saved games: Could not parse"), "{text}");
        assert!(text.contains("Could not replay game #1: Could not parse"), "{text}");
        assert!(text.contains("Invalid choice. Try again."), "{text}");
    }

    #[test]
    fn menu_stops_at_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path().join("games.json"));

        run(&mut console("2\n"), &store, &OPTIONS).unwrap();
    }
}

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use mineclear_core::*;

use crate::config::Options;
use crate::console::Console;
use crate::render::render;
use crate::store::{GameRecord, GameStore, MoveRecord};

/// How faithfully a saved game was reproduced.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayReport {
    pub moves_replayed: usize,
    /// Moves whose reproduced outcome differs from the recorded one
    pub mismatches: usize,
    pub state: SessionState,
    pub board: Board,
}

/// Re-issues one recorded move, returning the label it produces now.
fn apply_move<Rec: Recorder>(session: &mut Session<Rec>, step: &MoveRecord) -> Result<Option<MoveLabel>> {
    let coords = step.coords();
    Ok(match step.action {
        MoveAction::Open => {
            let outcome = session.open(coords)?;
            MoveLabel::for_open(outcome, session.state())
        }
        MoveAction::Flag => {
            session.toggle_flag(coords)?.has_update().then_some(MoveLabel::Flagged)
        }
    })
}

fn action_name(action: MoveAction) -> &'static str {
    match action {
        MoveAction::Open => "open",
        MoveAction::Flag => "flag",
    }
}

/// Plays a saved game back on the layout it was played on, optionally waiting for Enter between moves.
pub fn replay<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    record: &GameRecord,
    options: &Options,
) -> Result<ReplayReport> {
    console.say(format!("=== Replay of game #{} ===", record.id))?;
    console.say(format!("Player: {}", record.player))?;
    console.say(format!(
        "Date: {}",
        record.played_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    ))?;
    console.say(format!("Board size: {}x{}", record.rows, record.cols))?;
    console.say(format!("Mines: {}", record.mine_count))?;
    console.say(format!("Result: {}", record.result.as_str()))?;
    console.say("")?;

    let layout = record.layout()?;
    let mut session = Session::new(Board::new(&layout), record.player.as_str(), NullRecorder);
    let mut report = ReplayReport {
        moves_replayed: 0,
        mismatches: 0,
        state: session.state(),
        board: session.board().clone(),
    };

    if record.moves.is_empty() {
        console.say("No moves were recorded in this game.")?;
        return Ok(report);
    }

    let mut pause = options.pause;
    if pause && console.prompt("Press Enter to start the replay...")?.is_none() {
        pause = false;
    }

    console.say("Initial board:")?;
    render(console.out(), &session.snapshot(), options.color)?;

    for (index, step) in record.moves.iter().enumerate() {
        if session.is_finished() {
            log::warn!(
                "Game #{} has {} recorded moves after the game ended",
                record.id,
                record.moves.len() - index
            );
            break;
        }

        console.say("")?;
        console.say(format!(
            "Move {}: {} ({}, {}) - {}",
            step.number,
            action_name(step.action),
            step.row,
            step.col,
            step.outcome.as_str()
        ))?;

        let reproduced = apply_move(&mut session, step)?;
        report.moves_replayed += 1;
        if reproduced != Some(step.outcome) {
            report.mismatches += 1;
            log::warn!(
                "Move {} of game #{} recorded as {} but replayed as {:?}",
                step.number,
                record.id,
                step.outcome.as_str(),
                reproduced.map(MoveLabel::as_str)
            );
        }

        render(console.out(), &session.snapshot(), options.color)?;
        match session.state() {
            SessionState::Won => console.say("Victory!")?,
            SessionState::Lost => console.say("Exploded on a mine!")?,
            SessionState::InProgress => {
                let more = index + 1 < record.moves.len();
                if pause && more && console.prompt("Press Enter for the next move...")?.is_none() {
                    pause = false;
                }
            }
        }
    }

    console.say("")?;
    console.say("=== Replay finished ===")?;

    report.state = session.state();
    report.board = session.board().clone();
    Ok(report)
}

/// Looks up a saved game and replays it, telling the user when there is no such game.
pub fn replay_by_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &GameStore,
    id: u64,
    options: &Options,
) -> Result<Option<ReplayReport>> {
    match store.get(id)? {
        Some(record) => {
            let report = replay(console, &record, options)?;
            if report.mismatches > 0 {
                console.say(format!(
                    "Warning: {} of {} moves did not replay as recorded.",
                    report.mismatches, report.moves_replayed
                ))?;
            }
            Ok(Some(report))
        }
        None => {
            console.say(format!("Game with id {id} not found!"))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::tests::{console, output};
    use crate::recorder::GameLog;

    const NO_PAUSE: Options = Options {
        seed: None,
        pause: false,
        color: false,
    };

    /// Plays `moves` on a fresh board and returns the saved record plus the final board.
    fn played(size: Coord2, mines: &[Coord2], moves: &[(MoveAction, Coord2)]) -> (GameRecord, Board) {
        let board = Board::new(&MineLayout::from_mine_coords(size, mines).unwrap());
        let mut session = Session::new(board, "ann", GameLog::new());
        for &(action, coords) in moves {
            match action {
                MoveAction::Open => session.open(coords).map(|_| ()).unwrap(),
                MoveAction::Flag => session.toggle_flag(coords).map(|_| ()).unwrap(),
            }
        }
        let board = session.board().clone();
        (session.into_recorder().into_record().unwrap(), board)
    }

    #[test]
    fn replay_reproduces_a_lost_game_exactly() {
        let (record, final_board) = played(
            (4, 4),
            &[(0, 3), (3, 0)],
            &[
                (MoveAction::Flag, (0, 3)),
                (MoveAction::Open, (0, 2)),
                (MoveAction::Open, (0, 3)),
                (MoveAction::Flag, (0, 3)),
                (MoveAction::Open, (3, 0)),
            ],
        );
        let mut console = console("");

        let report = replay(&mut console, &record, &NO_PAUSE).unwrap();

        assert_eq!(report.moves_replayed, 5);
        assert_eq!(report.mismatches, 0);
        assert_eq!(report.state, SessionState::Lost);
        assert_eq!(report.board, final_board);
        let text = output(console);
        assert!(text.contains("Move 5: open (3, 0) - exploded"));
        assert!(text.contains("Exploded on a mine!"));
        assert!(text.ends_with("=== Replay finished ===\n"));
    }

    #[test]
    fn replay_reproduces_a_win() {
        let (record, final_board) = played((3, 3), &[(0, 0)], &[(MoveAction::Open, (2, 2))]);
        let mut console = console("");

        let report = replay(&mut console, &record, &NO_PAUSE).unwrap();

        assert_eq!(report.state, SessionState::Won);
        assert_eq!(report.mismatches, 0);
        assert_eq!(report.board, final_board);
        assert!(output(console).contains("Victory!"));
    }

    #[test]
    fn replay_counts_tampered_outcomes() {
        let (mut record, _) = played(
            (2, 2),
            &[(1, 1)],
            &[(MoveAction::Open, (0, 0)), (MoveAction::Open, (1, 1))],
        );
        record.moves[0].outcome = MoveLabel::Won;

        let report = replay(&mut console(""), &record, &NO_PAUSE).unwrap();

        assert_eq!(report.mismatches, 1);
        assert_eq!(report.state, SessionState::Lost);
    }

    #[test]
    fn replay_pauses_between_moves() {
        let (record, _) = played(
            (3, 3),
            &[(0, 0), (2, 2)],
            &[
                (MoveAction::Open, (0, 1)),
                (MoveAction::Open, (1, 1)),
                (MoveAction::Open, (0, 0)),
            ],
        );
        let options = Options {
            pause: true,
            ..NO_PAUSE
        };
        let mut console = console("\n\n\n\n");

        let report = replay(&mut console, &record, &options).unwrap();

        assert_eq!(report.moves_replayed, 3);
        let text = output(console);
        assert_eq!(text.matches("Press Enter to start the replay...").count(), 1);
        assert_eq!(text.matches("Press Enter for the next move...").count(), 2);
    }

    #[test]
    fn replay_without_moves_only_shows_the_header() {
        let (mut record, _) = played((2, 2), &[(1, 1)], &[(MoveAction::Open, (1, 1))]);
        record.moves.clear();
        let mut console = console("");

        let report = replay(&mut console, &record, &NO_PAUSE).unwrap();

        assert_eq!(report.moves_replayed, 0);
        assert!(output(console).contains("No moves were recorded in this game."));
    }

    #[test]
    fn replay_by_id_reports_unknown_games() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path().join("games.json"));
        let (record, _) = played((2, 2), &[(1, 1)], &[(MoveAction::Open, (1, 1))]);
        let id = store.append(record).unwrap();
        let mut console = console("");

        assert!(replay_by_id(&mut console, &store, id, &NO_PAUSE).unwrap().is_some());
        assert!(replay_by_id(&mut console, &store, id + 1, &NO_PAUSE).unwrap().is_none());
        assert!(output(console).contains(&format!("Game with id {} not found!", id + 1)));
    }
}

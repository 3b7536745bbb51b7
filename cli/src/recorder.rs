use chrono::Utc;
use mineclear_core::*;

use crate::store::{GameRecord, MoveRecord};

/// Buffers one game in memory; nothing reaches the store until the game has a result.
#[derive(Debug, Default)]
pub struct GameLog {
    player: String,
    config: Option<GameConfig>,
    mines: Vec<Coord2>,
    moves: Vec<MoveRecord>,
    result: Option<GameResult>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished game, or `None` if it was abandoned.
    pub fn into_record(self) -> Option<GameRecord> {
        let result = self.result?;
        let config = self.config?;
        Some(GameRecord {
            id: 0,
            played_at: Utc::now(),
            player: self.player,
            rows: config.size.0,
            cols: config.size.1,
            mine_count: config.mines,
            mines: self.mines,
            result,
            moves: self.moves,
        })
    }
}

impl Recorder for GameLog {
    fn game_started(&mut self, player: &str, config: GameConfig, mines: &[Coord2]) {
        *self = Self {
            player: player.to_string(),
            config: Some(config),
            mines: mines.to_vec(),
            ..Self::default()
        };
    }

    fn move_recorded(&mut self, (row, col): Coord2, action: MoveAction, outcome: MoveLabel) {
        let number = self.moves.len() as u32 + 1;
        self.moves.push(MoveRecord {
            number,
            row,
            col,
            action,
            outcome,
        });
    }

    fn game_finished(&mut self, result: GameResult) {
        if self.result.is_some() {
            log::warn!("Game already finished, ignoring second result {}", result.as_str());
            return;
        }
        self.result = Some(result);
    }
}

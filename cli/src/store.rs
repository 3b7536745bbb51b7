use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use mineclear_core::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub number: u32,
    pub row: Coord,
    pub col: Coord,
    pub action: MoveAction,
    pub outcome: MoveLabel,
}

impl MoveRecord {
    pub fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// One finished game, with everything needed to replay it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Assigned by the store, 0 until saved
    pub id: u64,
    pub played_at: DateTime<Utc>,
    pub player: String,
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
    pub mines: Vec<Coord2>,
    pub result: GameResult,
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    pub fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    /// Rebuilds the exact mine layout the game was played on.
    pub fn layout(&self) -> mineclear_core::Result<MineLayout> {
        let layout = MineLayout::from_mine_coords(self.size(), &self.mines)?;
        if layout.mine_count() != self.mine_count {
            log::warn!(
                "Game #{} declares {} mines but lists {}",
                self.id,
                self.mine_count,
                layout.mine_count()
            );
        }
        Ok(layout)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    games: Vec<GameRecord>,
}

/// Finished games kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No store at {}, starting empty", self.path.display());
                return Ok(StoreFile::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Could not read {}", self.path.display()));
            }
        };

        serde_json::from_str(&data).with_context(|| format!("Could not parse {}", self.path.display()))
    }

    fn save(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(file).context("Could not serialize games")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).with_context(|| format!("Could not write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Could not replace {}", self.path.display()))?;
        Ok(())
    }

    /// All games, newest first.
    pub fn list(&self) -> Result<Vec<GameRecord>> {
        let mut games = self.load()?.games;
        games.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        Ok(games)
    }

    pub fn get(&self, id: u64) -> Result<Option<GameRecord>> {
        Ok(self.load()?.games.into_iter().find(|game| game.id == id))
    }

    /// Stores `record` under the next free id and returns it.
    pub fn append(&self, mut record: GameRecord) -> Result<u64> {
        let mut file = self.load()?;
        record.id = file.games.iter().map(|game| game.id).max().unwrap_or(0) + 1;
        let id = record.id;
        file.games.push(record);
        self.save(&file)?;
        log::info!("Saved game #{} to {}", id, self.path.display());
        Ok(id)
    }
}

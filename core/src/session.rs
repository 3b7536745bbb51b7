use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn result(self) -> Option<GameResult> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(GameResult::Won),
            Self::Lost => Some(GameResult::Lost),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveAction {
    Open,
    Flag,
}

/// How a recorded move turned out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveLabel {
    Safe,
    Exploded,
    Won,
    /// A flag was placed or removed; flag attempts that change nothing are not recorded
    Flagged,
}

impl MoveLabel {
    /// Label of an open move given the state it left the game in, `None` when it was outside the grid.
    pub const fn for_open(outcome: OpenOutcome, state: SessionState) -> Option<Self> {
        match (outcome, state) {
            (OpenOutcome::OutOfBounds, _) => None,
            (OpenOutcome::Exploded, _) => Some(Self::Exploded),
            (OpenOutcome::Safe, SessionState::Won) => Some(Self::Won),
            (OpenOutcome::Safe, _) => Some(Self::Safe),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Exploded => "exploded",
            Self::Won => "won",
            Self::Flagged => "flagged",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Won,
    Lost,
}

impl GameResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

/// Receives the course of a game, in order: one start, any number of moves, at most one finish.
pub trait Recorder {
    fn game_started(&mut self, player: &str, config: GameConfig, mines: &[Coord2]);
    fn move_recorded(&mut self, coords: Coord2, action: MoveAction, outcome: MoveLabel);
    fn game_finished(&mut self, result: GameResult);
}

/// Discards everything, for replays and throwaway games.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn game_started(&mut self, _player: &str, _config: GameConfig, _mines: &[Coord2]) {}
    fn move_recorded(&mut self, _coords: Coord2, _action: MoveAction, _outcome: MoveLabel) {}
    fn game_finished(&mut self, _result: GameResult) {}
}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn game_started(&mut self, player: &str, config: GameConfig, mines: &[Coord2]) {
        (**self).game_started(player, config, mines)
    }

    fn move_recorded(&mut self, coords: Coord2, action: MoveAction, outcome: MoveLabel) {
        (**self).move_recorded(coords, action, outcome)
    }

    fn game_finished(&mut self, result: GameResult) {
        (**self).game_finished(result)
    }
}

/// One playthrough of a board, from the first move until a win or a loss.
#[derive(Debug)]
pub struct Session<R> {
    board: Board,
    state: SessionState,
    exploded: Option<Coord2>,
    move_count: u32,
    recorder: R,
}

impl<R: Recorder> Session<R> {
    pub fn new(board: Board, player: impl AsRef<str>, mut recorder: R) -> Self {
        let player = player.as_ref();
        recorder.game_started(player, board.game_config(), &board.mine_coords());
        log::debug!("Started game for {:?} on {:?}", player, board.game_config());

        Self {
            board,
            state: SessionState::default(),
            exploded: None,
            move_count: 0,
            recorder,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn exploded(&self) -> Option<Coord2> {
        self.exploded
    }

    /// Number of moves handed to the recorder so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn into_recorder(self) -> R {
        self.recorder
    }

    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        self.check_in_progress()?;

        let outcome = self.board.open(coords);
        match outcome {
            OpenOutcome::Exploded => {
                self.exploded = Some(coords);
                self.state = SessionState::Lost;
            }
            OpenOutcome::Safe if self.board.check_win() => self.state = SessionState::Won,
            OpenOutcome::Safe | OpenOutcome::OutOfBounds => {}
        }

        let Some(label) = MoveLabel::for_open(outcome, self.state) else {
            return Ok(outcome);
        };

        self.record(coords, MoveAction::Open, label);
        if let Some(result) = self.state.result() {
            log::debug!("Game over at {:?}: {}", coords, result.as_str());
            self.recorder.game_finished(result);
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_in_progress()?;

        let outcome = self.board.toggle_flag(coords);
        if outcome.has_update() {
            self.record(coords, MoveAction::Flag, MoveLabel::Flagged);
        }
        Ok(outcome)
    }

    /// The board as the player should see it; the whole layout once the game is over.
    pub fn snapshot(&self) -> Snapshot {
        self.board
            .snapshot()
            .with_reveal_all(self.state.is_finished())
            .with_exploded(self.exploded)
    }

    fn record(&mut self, coords: Coord2, action: MoveAction, label: MoveLabel) {
        self.move_count += 1;
        log::trace!("Move {}: {:?} {:?} -> {}", self.move_count, action, coords, label.as_str());
        self.recorder.move_recorded(coords, action, label);
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

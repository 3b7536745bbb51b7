use serde::{Deserialize, Serialize};

/// State of one grid position as stored by the board.
///
/// `is_mine` and `adjacent_mines` are fixed once the board is built; only the open and flag bits change
/// afterwards, and never both at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_open: bool,
    is_flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_open(self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the neighbours. Meaningless for a mine cell.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Closed and unflagged, i.e. an open would act on it.
    pub const fn is_openable(self) -> bool {
        !self.is_open && !self.is_flagged
    }

    pub(crate) fn place_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn open(&mut self) {
        debug_assert!(!self.is_flagged, "flagged cells are never opened");
        self.is_open = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        debug_assert!(!self.is_open, "open cells are never flagged");
        self.is_flagged = !self.is_flagged;
    }
}

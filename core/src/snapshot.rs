use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player gets to see of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Closed,
    Open(u8),
    Flag,
    /// Only shown once the game is over
    Mine,
    /// The mine that ended the game
    Exploded,
}

/// Plain-data copy of a board for whoever draws it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub flag_count: CellCount,
    pub cells: Array2<Cell>,
    pub reveal_all: bool,
    pub exploded: Option<Coord2>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            mine_count: board.mine_count(),
            flag_count: board.flag_count(),
            cells: board.cells().clone(),
            reveal_all: false,
            exploded: None,
        }
    }

    pub fn with_reveal_all(mut self, reveal_all: bool) -> Self {
        self.reveal_all = reveal_all;
        self
    }

    pub fn with_exploded(mut self, exploded: Option<Coord2>) -> Self {
        self.exploded = exploded;
        self
    }

    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flag_count)
    }

    /// `None` outside the grid.
    pub fn visible_at(&self, coords: Coord2) -> Option<VisibleCell> {
        let cell = *self.cells.get(coords.to_nd_index())?;

        Some(if self.exploded == Some(coords) {
            VisibleCell::Exploded
        } else if cell.is_open() && cell.is_mine() {
            VisibleCell::Mine
        } else if cell.is_open() {
            VisibleCell::Open(cell.adjacent_mines())
        } else if cell.is_flagged() {
            VisibleCell::Flag
        } else if self.reveal_all && cell.is_mine() {
            VisibleCell::Mine
        } else {
            VisibleCell::Closed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn hides_mines_while_playing() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.open((1, 1));
        board.toggle_flag((0, 1));

        let snapshot = board.snapshot();

        assert_eq!(snapshot.visible_at((0, 0)), Some(VisibleCell::Closed));
        assert_eq!(snapshot.visible_at((0, 1)), Some(VisibleCell::Flag));
        assert_eq!(snapshot.visible_at((1, 1)), Some(VisibleCell::Open(1)));
        assert_eq!(snapshot.visible_at((1, 0)), Some(VisibleCell::Closed));
        assert_eq!(snapshot.mines_left(), 0);
    }

    #[test]
    fn reveal_all_shows_mines_but_keeps_flags() {
        let mut board = board((2, 2), &[(0, 0), (1, 1)]);
        board.toggle_flag((1, 1));

        let snapshot = board.snapshot().with_reveal_all(true);

        assert_eq!(snapshot.visible_at((0, 0)), Some(VisibleCell::Mine));
        assert_eq!(snapshot.visible_at((1, 1)), Some(VisibleCell::Flag));
        assert_eq!(snapshot.visible_at((0, 1)), Some(VisibleCell::Closed));
    }

    #[test]
    fn exploded_cell_is_distinguished() {
        let mut board = board((2, 2), &[(0, 0), (1, 1)]);
        board.open((0, 0));

        let snapshot = board
            .snapshot()
            .with_reveal_all(true)
            .with_exploded(Some((0, 0)));

        assert_eq!(snapshot.visible_at((0, 0)), Some(VisibleCell::Exploded));
        assert_eq!(snapshot.visible_at((1, 1)), Some(VisibleCell::Mine));
    }

    #[test]
    fn outside_the_grid_is_nothing() {
        let snapshot = board((2, 3), &[(0, 0)]).snapshot();

        assert_eq!(snapshot.visible_at((2, 0)), None);
        assert_eq!(snapshot.visible_at((0, 3)), None);
        assert_eq!(snapshot.visible_at((1, 2)), Some(VisibleCell::Closed));
    }
}

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The mine positions of one board, fixed for the board's whole life.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Empty layout of the given size, used by generators before placing mines.
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Builds a layout from an explicit list of mines, as recorded for a replay.
    ///
    /// Duplicate coordinates count once. The resulting board must satisfy the same constraints as a freshly
    /// generated one.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::validate_size(size)?;
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            layout.place(coords);
        }

        GameConfig::new(size, layout.mine_count)?;
        Ok(layout)
    }

    /// Marks `coords` as a mine, returns whether it was newly placed.
    pub(crate) fn place(&mut self, coords: Coord2) -> bool {
        if self[coords] {
            return false;
        }
        self[coords] = true;
        self.mine_count += 1;
        true
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    /// Mine positions in row-major order.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod layout;
mod session;
mod snapshot;
mod types;

/// Smallest allowed board side.
pub const MIN_SIDE: Coord = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checks `rows, cols >= 2` and `1 <= mines < rows * cols`.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::validate_size(size)?;
        let config = Self::new_unchecked(size, mines);
        if mines == 0 || mines >= config.total_cells() {
            return Err(GameError::InvalidDimensions);
        }
        Ok(config)
    }

    /// Square board, the shape offered by the interactive menu.
    pub fn square(side: Coord, mines: CellCount) -> Result<Self> {
        Self::new((side, side), mines)
    }

    pub(crate) fn validate_size((rows, cols): Coord2) -> Result<()> {
        if rows < MIN_SIDE || cols < MIN_SIDE {
            Err(GameError::InvalidDimensions)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells() - 1
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of opening one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    /// No mine there, or nothing to do because the cell was already open or flagged
    Safe,
    Exploded,
    /// Outside the grid, nothing happened
    OutOfBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_accepts_boundary_values() {
        assert!(GameConfig::new((2, 2), 1).is_ok());
        assert!(GameConfig::new((2, 2), 3).is_ok());
        assert!(GameConfig::new((Coord::MAX, 2), 1).is_ok());
        assert_eq!(GameConfig::square(3, 8).unwrap().max_mines(), 8);
    }

    #[test]
    fn config_rejects_invalid_dimensions() {
        assert_eq!(GameConfig::new((1, 5), 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new((5, 0), 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new((2, 2), 0), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new((2, 2), 4), Err(GameError::InvalidDimensions));
    }
}

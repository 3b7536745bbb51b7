use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid of one game: which cells hold mines, which are open or flagged, and how many mines each cell sees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Cell>,
    mine_count: CellCount,
    open_count: CellCount,
    flag_count: CellCount,
}

impl Board {
    pub fn new(layout: &MineLayout) -> Self {
        let size = layout.size();
        let mut grid: Array2<Cell> = Array2::default(size.to_nd_index());

        for coords in layout.mine_coords() {
            grid[coords.to_nd_index()].place_mine();
        }

        let mut board = Self {
            grid,
            mine_count: layout.mine_count(),
            open_count: 0,
            flag_count: 0,
        };
        board.compute_adjacency();
        board
    }

    /// Fresh board with mines placed from `rng`.
    pub fn random<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        Self::new(&place_mines(config, rng))
    }

    pub fn generate(config: GameConfig, generator: impl LayoutGenerator) -> Self {
        Self::new(&generator.generate(config))
    }

    fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.grid[coords.to_nd_index()].is_mine() {
                    continue;
                }
                let count = self
                    .grid
                    .iter_neighbor_cells(coords)
                    .filter(|cell| cell.is_mine())
                    .count() as u8;
                self.grid[coords.to_nd_index()].set_adjacent_mines(count);
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.grid.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn open_count(&self) -> CellCount {
        self.open_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flag_count)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.grid
    }

    /// Mine positions in row-major order, enough to rebuild this board with [`MineLayout::from_mine_coords`].
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.grid
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub fn mine_layout(&self) -> MineLayout {
        let mut layout = MineLayout::empty(self.size());
        for coords in self.mine_coords() {
            layout.place(coords);
        }
        layout
    }

    /// Opens a cell, flood-filling through zero-count cells.
    ///
    /// Opening an open or flagged cell changes nothing and reports [`OpenOutcome::Safe`].
    pub fn open(&mut self, coords: Coord2) -> OpenOutcome {
        let Some(cell) = self.cell_at(coords) else {
            log::debug!("Ignoring open outside the grid at {:?}", coords);
            return OpenOutcome::OutOfBounds;
        };

        if !cell.is_openable() {
            return OpenOutcome::Safe;
        }

        self.open_cell(coords);

        if cell.is_mine() {
            log::debug!("Opened mine at {:?}", coords);
            return OpenOutcome::Exploded;
        }

        log::debug!("Open cell at {:?}, mine count: {}", coords, cell.adjacent_mines());
        if cell.adjacent_mines() == 0 {
            self.flood_fill(coords);
        }

        OpenOutcome::Safe
    }

    /// Opens everything reachable from the zero cell at `start` through other zero cells, plus their border.
    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit: VecDeque<_> = self.openable_neighbors(start).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            start,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.grid[visit_coords.to_nd_index()];

            // queued twice by two zero neighbours, or flagged
            if !cell.is_openable() {
                continue;
            }

            self.open_cell(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                cell.adjacent_mines()
            );

            if cell.adjacent_mines() == 0 {
                to_visit.extend(self.openable_neighbors(visit_coords));
            }
        }
    }

    fn openable_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.grid
            .iter_neighbor_cells_with_index(coords)
            .filter(|(_, cell)| cell.is_openable())
            .map(|(pos, _)| pos)
    }

    fn open_cell(&mut self, coords: Coord2) {
        self.grid[coords.to_nd_index()].open();
        if !self.grid[coords.to_nd_index()].is_mine() {
            self.open_count += 1;
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let Some(cell) = self.cell_at(coords) else {
            return MarkOutcome::NoChange;
        };

        if cell.is_open() {
            return MarkOutcome::NoChange;
        }

        self.grid[coords.to_nd_index()].toggle_flag();
        if cell.is_flagged() {
            self.flag_count -= 1;
        } else {
            self.flag_count += 1;
        }
        MarkOutcome::Changed
    }

    /// True once every cell without a mine is open. Flags play no part.
    pub fn check_win(&self) -> bool {
        self.grid.iter().all(|cell| cell.is_mine() || cell.is_open())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(self)
    }
}

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement from a seed, so the same seed always yields the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines(config, &mut rng)
    }
}

/// Rejection sampling: draw a uniformly random cell and mine it unless it already is one, until the requested
/// count is reached. Every layout with `config.mines` mines is equally likely.
pub fn place_mines<R: Rng>(config: GameConfig, rng: &mut R) -> MineLayout {
    let (rows, cols) = config.size;
    let mut layout = MineLayout::empty(config.size);

    // a validated config always leaves a free cell, this only guards hand-built ones
    let mines = config.mines.min(config.total_cells());
    let mut draws = 0u32;
    while layout.mine_count() < mines {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        draws += 1;
        if layout.place(coords) {
            log::trace!("Placed mine at {:?}", coords);
        }
    }

    log::debug!(
        "Placed {} mines on {}x{} after {} draws",
        layout.mine_count(),
        rows,
        cols,
        draws
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord2, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    #[test]
    fn places_exactly_the_requested_number_of_mines() {
        for seed in 0..32 {
            for &(size, mines) in &[((2, 2), 1), ((2, 2), 3), ((9, 9), 10), ((16, 30), 99), ((5, 7), 34)] {
                let layout = RandomLayoutGenerator::new(seed).generate(config(size, mines));
                assert_eq!(layout.mine_count(), mines);
                assert_eq!(layout.mine_coords().len(), usize::from(mines));
            }
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = RandomLayoutGenerator::new(42).generate(config((16, 16), 40));
        let b = RandomLayoutGenerator::new(42).generate(config((16, 16), 40));

        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = RandomLayoutGenerator::new(1).generate(config((16, 16), 40));
        let b = RandomLayoutGenerator::new(2).generate(config((16, 16), 40));

        assert_ne!(a.mine_coords(), b.mine_coords());
    }

    #[test]
    fn every_cell_can_receive_a_mine() {
        let mut hits = ndarray::Array2::<u32>::zeros([3, 3]);
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..900 {
            for (row, col) in place_mines(config((3, 3), 1), &mut rng).mine_coords() {
                hits[[usize::from(row), usize::from(col)]] += 1;
            }
        }

        // 100 expected per cell
        assert!(hits.iter().all(|&count| count > 40 && count < 180), "{hits:?}");
    }
}

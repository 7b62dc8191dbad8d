//! Random initial cell cultures

use super::{Cell, Grid};
use crate::error::SimulationError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fills a world with randomly living interior cells.
///
/// Seeded with ChaCha8, so the same seed always yields the same culture.
#[derive(Clone, Debug)]
pub struct Randomizer {
    rng: ChaCha8Rng,
    fill_probability: f64,
}

impl Randomizer {
    /// Create a randomizer; an unseeded one draws its seed from the OS
    pub fn new(seed: Option<u64>, fill_probability: f64) -> Self {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            fill_probability: if fill_probability.is_nan() {
                0.0
            } else {
                fill_probability.clamp(0.0, 1.0)
            },
        }
    }

    /// Build a `width` x `height` world.
    ///
    /// Boundary cells are dead guard cells; each interior cell is alive with
    /// the configured probability.
    pub fn randomize(&mut self, width: usize, height: usize) -> Result<Grid, SimulationError> {
        let mut grid = Grid::new(width, height)?;
        let points: Vec<_> = grid.points().collect();
        for point in points {
            let cell = if grid.is_boundary(point) {
                Cell::guard()
            } else {
                Cell::new(self.rng.gen_bool(self.fill_probability))
            };
            grid.set(point, cell)?;
        }
        Ok(grid)
    }
}

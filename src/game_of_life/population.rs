//! The simulated population: owns the world and steps it generation by
//! generation

use super::{io, Cell, Grid, Maturity, Point, Randomizer, RuleId, RuleRegistry};
use crate::error::SimulationError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the initial culture comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    /// Seed file; the file also fixes the world dimensions
    File(PathBuf),
    /// Random interior cells within a dead guard border
    Random {
        width: usize,
        height: usize,
        rng_seed: Option<u64>,
        fill_probability: f64,
    },
}

impl SeedSource {
    /// Build the initial grid
    pub fn build_grid(&self) -> Result<Grid> {
        match self {
            SeedSource::File(path) => io::load_grid_from_file(path),
            SeedSource::Random {
                width,
                height,
                rng_seed,
                fill_probability,
            } => Randomizer::new(*rng_seed, *fill_probability)
                .randomize(*width, *height)
                .context("Failed to randomize cell culture"),
        }
    }
}

/// All cells of the world, the generation counter and the rules governing
/// even and odd generations.
///
/// Rules are owned by the [`RuleRegistry`] the population was initiated
/// with; the population only keeps handles into it.
#[derive(Debug, Clone)]
pub struct Population {
    generation: u64,
    grid: Grid,
    even_rule: RuleId,
    odd_rule: RuleId,
}

impl Population {
    /// Initiate a population over an already seeded grid.
    ///
    /// An empty `odd_rule` makes the even rule govern every generation.
    pub fn initiate_population(
        grid: Grid,
        registry: &mut RuleRegistry,
        even_rule: &str,
        odd_rule: &str,
    ) -> Result<Self, SimulationError> {
        let even = registry.resolve(&grid, even_rule)?;
        let odd = if odd_rule.is_empty() {
            even
        } else {
            registry.resolve(&grid, odd_rule)?
        };

        info!(
            width = grid.width(),
            height = grid.height(),
            living = grid.living_count(),
            even_rule,
            odd_rule = if odd_rule.is_empty() { even_rule } else { odd_rule },
            "initiated population"
        );

        Ok(Self {
            generation: 0,
            grid,
            even_rule: even,
            odd_rule: odd,
        })
    }

    /// Seed the grid from `source`, then initiate
    pub fn initiate_from(
        source: &SeedSource,
        registry: &mut RuleRegistry,
        even_rule: &str,
        odd_rule: &str,
    ) -> Result<Self> {
        let grid = source.build_grid()?;
        let population = Self::initiate_population(grid, registry, even_rule, odd_rule)?;
        Ok(population)
    }

    /// Step one generation and return the new generation number.
    ///
    /// The rule for the current parity stages every cell against the
    /// committed state, then all cells are committed.
    pub fn calculate_new_generation(
        &mut self,
        registry: &RuleRegistry,
    ) -> Result<u64, SimulationError> {
        let rule = registry.get(self.rule_for_generation(self.generation))?;

        rule.execute_rule(&mut self.grid)?;
        self.grid.commit();

        self.generation += 1;
        debug!(
            generation = self.generation,
            rule = rule.name(),
            living = self.grid.living_count(),
            "calculated new generation"
        );
        Ok(self.generation)
    }

    /// Handle of the rule that governs `generation`
    pub fn rule_for_generation(&self, generation: u64) -> RuleId {
        if generation % 2 == 0 {
            self.even_rule
        } else {
            self.odd_rule
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn even_rule(&self) -> RuleId {
        self.even_rule
    }

    pub fn odd_rule(&self) -> RuleId {
        self.odd_rule
    }

    /// Whether either governing rule reports elder cells
    pub fn tracks_elders(&self, registry: &RuleRegistry) -> Result<bool, SimulationError> {
        Ok(registry.get(self.even_rule)?.kind().tracks_elders()
            || registry.get(self.odd_rule)?.kind().tracks_elders())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `position`, which must lie inside the world
    pub fn cell_at_position(&self, position: Point) -> Result<&Cell, SimulationError> {
        self.grid.get(position).ok_or(SimulationError::OutOfBounds {
            point: position,
            width: self.grid.width(),
            height: self.grid.height(),
        })
    }

    /// Number of grid entries, living or dead
    pub fn total_cell_population(&self) -> usize {
        self.grid.len()
    }

    pub fn living_cell_count(&self) -> usize {
        self.grid.living_count()
    }

    /// Positions of living elder cells
    pub fn elders(&self) -> Vec<Point> {
        self.grid
            .iter()
            .filter(|(_, cell)| cell.maturity() == Some(Maturity::Elder))
            .map(|(point, _)| point)
            .collect()
    }

    /// The oldest elder; ties go to the smallest position
    pub fn prime_elder(&self) -> Option<Point> {
        self.grid
            .iter()
            .filter(|(_, cell)| cell.maturity() == Some(Maturity::Elder))
            .min_by(|(pa, a), (pb, b)| b.age().cmp(&a.age()).then(pa.cmp(pb)))
            .map(|(point, _)| point)
    }
}

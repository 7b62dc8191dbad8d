//! Staged Game of Life
//!
//! A bounded cellular automaton whose survival and birth logic is pluggable
//! and may differ between even and odd generations. Every generation is
//! computed in two phases: a rule stages an action for each cell from the
//! committed state of its neighbors, then all cells commit together.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use error::SimulationError;
pub use game_of_life::{Population, RuleRegistry};

use anyhow::{Context, Result};
use itertools::Itertools;

/// A finished run together with the registry owning its rules
#[derive(Debug)]
pub struct Simulation {
    pub population: Population,
    pub registry: RuleRegistry,
}

/// Initiate a population from `settings` and run the configured generations.
///
/// `observe` sees the seeded population and then every new generation.
pub fn run_simulation<F>(settings: &Settings, mut observe: F) -> Result<Simulation>
where
    F: FnMut(&Population, &RuleRegistry) -> Result<()>,
{
    settings.validate()?;

    let mut registry = RuleRegistry::new();
    let mut population = Population::initiate_from(
        &settings.seed_source(),
        &mut registry,
        &settings.rules.even,
        &settings.rules.odd,
    )
    .with_context(|| {
        format!(
            "Failed to initiate population (available rules: {})",
            RuleRegistry::available_rules().join(", ")
        )
    })?;

    observe(&population, &registry)?;
    for _ in 0..settings.simulation.generations {
        population.calculate_new_generation(&registry)?;
        observe(&population, &registry)?;
    }

    Ok(Simulation {
        population,
        registry,
    })
}

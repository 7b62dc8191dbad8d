//! Cell culture core: coordinates, cells, the world grid, rules of existence
//! and the population that steps them

pub mod cell;
pub mod grid;
pub mod io;
pub mod point;
pub mod population;
pub mod randomizer;
pub mod registry;
pub mod rules;

pub use cell::{Cell, CellAction, Maturity, ELDER_AGE, OLD_AGE};
pub use grid::{Grid, Neighborhood, MAX_CELLS};
pub use io::{create_example_seeds, load_grid_from_file, parse_seed, save_grid_to_file, SeedError};
pub use point::Point;
pub use population::{Population, SeedSource};
pub use randomizer::Randomizer;
pub use registry::{RuleId, RuleRegistry};
pub use rules::{PopulationLimits, RuleKind, RuleOfExistence};

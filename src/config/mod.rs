//! Configuration management for the cell culture simulation

pub mod settings;

pub use settings::{
    CliOverrides, OutputConfig, OutputFormat, RulesConfig, SeedConfig, Settings,
    SimulationConfig, WorldConfig, MIN_WORLD_SIDE,
};

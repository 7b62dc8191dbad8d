//! Error types for the simulation core

use crate::game_of_life::Point;
use thiserror::Error;

/// Failures surfaced by the grid, rule registry and population
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("unrecognized rule of existence: '{0}'")]
    UnknownRule(String),

    #[error("position {point} is outside the {width}x{height} world")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    #[error("world dimensions {width}x{height} are invalid, both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error(
        "rule '{rule}' is bound to a {bound_width}x{bound_height} world but was run against {width}x{height}"
    )]
    WorldMismatch {
        rule: String,
        bound_width: usize,
        bound_height: usize,
        width: usize,
        height: usize,
    },

    #[error("rule handle {0} does not belong to this registry")]
    UnknownRuleHandle(usize),
}

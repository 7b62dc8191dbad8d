//! Rules of existence: stage an action for every interior cell from its
//! neighbor count

use super::{CellAction, Grid, Neighborhood};
use crate::error::SimulationError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Neighbor thresholds a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationLimits {
    /// A living cell with fewer neighbors dies
    pub underpopulation: u8,
    /// A living cell with more neighbors dies
    pub overpopulation: u8,
    /// A dead cell with exactly this many neighbors is born
    pub resurrection: u8,
}

impl PopulationLimits {
    /// Action for a cell given its committed state and neighbor count
    pub fn action_for(&self, alive: bool, neighbors: u8) -> CellAction {
        match alive {
            true if neighbors < self.underpopulation || neighbors > self.overpopulation => {
                CellAction::Kill
            }
            true => CellAction::NoOp,
            false if neighbors == self.resurrection => CellAction::GiveLife,
            false => CellAction::NoOp,
        }
    }
}

/// Known rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Conway,
    VonNeumann,
    /// Conway's thresholds; populations governed by it report elder cells
    Erik,
}

impl RuleKind {
    pub const ALL: [RuleKind; 3] = [RuleKind::Conway, RuleKind::VonNeumann, RuleKind::Erik];

    /// Name the registry resolves this variant by
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Conway => "conway",
            RuleKind::VonNeumann => "von_neumann",
            RuleKind::Erik => "erik",
        }
    }

    pub fn limits(self) -> PopulationLimits {
        match self {
            RuleKind::Conway | RuleKind::VonNeumann | RuleKind::Erik => PopulationLimits {
                underpopulation: 2,
                overpopulation: 3,
                resurrection: 3,
            },
        }
    }

    pub fn neighborhood(self) -> Neighborhood {
        match self {
            RuleKind::Conway | RuleKind::Erik => Neighborhood::Moore,
            RuleKind::VonNeumann => Neighborhood::Cardinal,
        }
    }

    /// Whether populations under this rule track elder cells
    pub fn tracks_elders(self) -> bool {
        matches!(self, RuleKind::Erik)
    }
}

impl FromStr for RuleKind {
    type Err = SimulationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| SimulationError::UnknownRule(name.to_string()))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule instance bound to the world it was created for.
///
/// Holds nothing across generations besides that binding; all state lives
/// in the grid it is run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOfExistence {
    kind: RuleKind,
    width: usize,
    height: usize,
}

impl RuleOfExistence {
    /// Bind a rule of the given kind to `grid`
    pub fn new(kind: RuleKind, grid: &Grid) -> Self {
        Self {
            kind,
            width: grid.width(),
            height: grid.height(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Dimensions of the world this rule was bound to
    pub fn bound_dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_bound_to(&self, grid: &Grid) -> bool {
        self.bound_dimensions() == (grid.width(), grid.height())
    }

    /// Stage phase.
    ///
    /// Every action is computed from the committed state before any of them
    /// is written, so the outcome does not depend on evaluation order. Only
    /// staged actions are touched; `alive` and `age` stay as they are until
    /// the cells are committed. Boundary cells are staged `Ignore`.
    pub fn execute_rule(&self, grid: &mut Grid) -> Result<(), SimulationError> {
        if !self.is_bound_to(grid) {
            return Err(SimulationError::WorldMismatch {
                rule: self.name().to_string(),
                bound_width: self.width,
                bound_height: self.height,
                width: grid.width(),
                height: grid.height(),
            });
        }

        let actions = self.stage_actions(grid);
        for (cell, action) in grid.cells_mut().iter_mut().zip(actions) {
            cell.set_next_action(action);
        }
        Ok(())
    }

    fn stage_actions(&self, grid: &Grid) -> Vec<CellAction> {
        let limits = self.kind.limits();
        let neighborhood = self.kind.neighborhood();

        grid.cells()
            .par_iter()
            .enumerate()
            .map(|(index, cell)| {
                let point = grid.point_at(index);
                if grid.is_boundary(point) {
                    CellAction::Ignore
                } else {
                    let neighbors = grid.count_neighbors(point, neighborhood);
                    limits.action_for(cell.is_alive(), neighbors)
                }
            })
            .collect()
    }
}

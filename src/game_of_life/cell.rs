//! Per-position cell state and the staged action protocol

use serde::{Deserialize, Serialize};

/// Age at which a living cell counts as old
pub const OLD_AGE: u32 = 5;
/// Age at which a living cell counts as an elder
pub const ELDER_AGE: u32 = 10;

/// Action staged for a cell during the stage phase, applied on commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellAction {
    #[default]
    NoOp,
    /// Guard cells only, never changes anything
    Ignore,
    GiveLife,
    Kill,
}

/// Age classification of a living cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    Young,
    Old,
    Elder,
}

/// A single cell of the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    alive: bool,
    age: u32,
    #[serde(skip)]
    staged: CellAction,
}

impl Cell {
    /// Create a cell with nothing staged
    pub fn new(alive: bool) -> Self {
        Self::with_action(alive, CellAction::NoOp)
    }

    /// Create a cell with an action already staged for the next commit
    pub fn with_action(alive: bool, staged: CellAction) -> Self {
        Self {
            alive,
            age: 0,
            staged,
        }
    }

    /// A dead guard cell that never takes part in the simulation
    pub fn guard() -> Self {
        Self::with_action(false, CellAction::Ignore)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Consecutive generations this cell has survived
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn staged_action(&self) -> CellAction {
        self.staged
    }

    pub fn set_next_action(&mut self, action: CellAction) {
        self.staged = action;
    }

    /// Commit the staged action, then clear it.
    pub fn update_state(&mut self) {
        match self.staged {
            CellAction::Kill => {
                self.alive = false;
                self.age = 0;
            }
            CellAction::GiveLife => {
                self.alive = true;
                self.age = 0;
            }
            CellAction::NoOp if self.alive => {
                self.age = self.age.saturating_add(1);
            }
            CellAction::NoOp | CellAction::Ignore => {}
        }
        self.staged = CellAction::NoOp;
    }

    /// Age classification, `None` for dead cells
    pub fn maturity(&self) -> Option<Maturity> {
        if !self.alive {
            return None;
        }
        Some(match self.age {
            age if age >= ELDER_AGE => Maturity::Elder,
            age if age >= OLD_AGE => Maturity::Old,
            _ => Maturity::Young,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_defaults() {
        let cell = Cell::new(true);
        assert!(cell.is_alive());
        assert_eq!(cell.age(), 0);
        assert_eq!(cell.staged_action(), CellAction::NoOp);
    }

    #[test]
    fn test_kill_resets_age() {
        let mut cell = Cell::new(true);
        cell.update_state();
        cell.update_state();
        assert_eq!(cell.age(), 2);

        cell.set_next_action(CellAction::Kill);
        cell.update_state();
        assert!(!cell.is_alive());
        assert_eq!(cell.age(), 0);
        assert_eq!(cell.staged_action(), CellAction::NoOp);
    }

    #[test]
    fn test_give_life_starts_at_zero() {
        let mut cell = Cell::new(false);
        cell.set_next_action(CellAction::GiveLife);
        cell.update_state();
        assert!(cell.is_alive());
        assert_eq!(cell.age(), 0);

        // First increment happens on the next survival
        cell.update_state();
        assert_eq!(cell.age(), 1);
    }

    #[test]
    fn test_noop_on_dead_cell_changes_nothing() {
        let mut cell = Cell::new(false);
        cell.update_state();
        assert!(!cell.is_alive());
        assert_eq!(cell.age(), 0);
    }

    #[test]
    fn test_ignore_never_changes_state() {
        let mut alive = Cell::with_action(true, CellAction::Ignore);
        alive.update_state();
        assert!(alive.is_alive());
        assert_eq!(alive.age(), 0);
        assert_eq!(alive.staged_action(), CellAction::NoOp);

        let mut guard = Cell::guard();
        guard.update_state();
        assert!(!guard.is_alive());
        assert_eq!(guard.age(), 0);
    }

    #[test]
    fn test_maturity_thresholds() {
        let mut cell = Cell::new(true);
        assert_eq!(cell.maturity(), Some(Maturity::Young));
        for _ in 0..OLD_AGE {
            cell.update_state();
        }
        assert_eq!(cell.maturity(), Some(Maturity::Old));
        for _ in OLD_AGE..ELDER_AGE {
            cell.update_state();
        }
        assert_eq!(cell.maturity(), Some(Maturity::Elder));
        assert_eq!(Cell::new(false).maturity(), None);
    }
}

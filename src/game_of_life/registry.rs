//! Registry that owns rule instances and hands out handles to them

use super::{Grid, RuleKind, RuleOfExistence};
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Handle to a rule owned by a [`RuleRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(usize);

/// Resolves rule names to rule instances, constructing each on first use.
///
/// Each name maps to exactly one instance for the lifetime of the registry;
/// instances are never removed.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<RuleOfExistence>,
    by_name: HashMap<String, RuleId>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names every registry can resolve
    pub fn available_rules() -> impl Iterator<Item = &'static str> {
        RuleKind::ALL.into_iter().map(RuleKind::name)
    }

    /// Return the cached rule for `name`, or construct one bound to `grid`.
    ///
    /// On a cache hit `grid` is ignored: the binding made at first
    /// construction is kept.
    pub fn resolve(&mut self, grid: &Grid, name: &str) -> Result<RuleId, SimulationError> {
        if let Some(&id) = self.by_name.get(name) {
            if !self.rules[id.0].is_bound_to(grid) {
                warn!(rule = name, "cached rule is bound to a world of different dimensions");
            }
            return Ok(id);
        }

        let kind: RuleKind = name.parse()?;
        let id = RuleId(self.rules.len());
        self.rules.push(RuleOfExistence::new(kind, grid));
        self.by_name.insert(name.to_string(), id);
        debug!(rule = name, id = id.0, "constructed rule of existence");
        Ok(id)
    }

    pub fn get(&self, id: RuleId) -> Result<&RuleOfExistence, SimulationError> {
        self.rules
            .get(id.0)
            .ok_or(SimulationError::UnknownRuleHandle(id.0))
    }

    /// Number of constructed rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_constructs_once() {
        let grid = Grid::new(5, 5).unwrap();
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());

        let first = registry.resolve(&grid, "conway").unwrap();
        let second = registry.resolve(&grid, "conway").unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).unwrap().kind(), RuleKind::Conway);

        let other = registry.resolve(&grid, "von_neumann").unwrap();
        assert_ne!(first, other);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve(&grid, "von_neumann"), Ok(other));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_cache_hit_keeps_first_binding() {
        let small = Grid::new(4, 4).unwrap();
        let large = Grid::new(9, 7).unwrap();
        let mut registry = RuleRegistry::new();

        let id = registry.resolve(&small, "erik").unwrap();
        assert_eq!(registry.resolve(&large, "erik").unwrap(), id);
        assert_eq!(registry.get(id).unwrap().bound_dimensions(), (4, 4));
    }

    #[test]
    fn test_unknown_rule() {
        let grid = Grid::new(3, 3).unwrap();
        let mut registry = RuleRegistry::new();
        assert_eq!(
            registry.resolve(&grid, "highlife"),
            Err(SimulationError::UnknownRule("highlife".to_string()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_foreign_handle() {
        let grid = Grid::new(3, 3).unwrap();
        let mut other = RuleRegistry::new();
        other.resolve(&grid, "conway").unwrap();
        let foreign = other.resolve(&grid, "erik").unwrap();

        let registry = RuleRegistry::new();
        assert_eq!(
            registry.get(foreign),
            Err(SimulationError::UnknownRuleHandle(1))
        );
    }

    #[test]
    fn test_available_rules() {
        let names: Vec<_> = RuleRegistry::available_rules().collect();
        assert_eq!(names, vec!["conway", "von_neumann", "erik"]);
    }
}

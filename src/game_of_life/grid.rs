//! Grid representation and utilities for the world rectangle

use super::{Cell, Point};
use crate::error::SimulationError;
use itertools::iproduct;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Largest number of cells a world may hold
pub const MAX_CELLS: usize = 1 << 24;

/// Which surrounding coordinates count as neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// All 8 surrounding coordinates
    Moore,
    /// The 4 orthogonally adjacent coordinates
    Cardinal,
}

impl Neighborhood {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::Moore => &MOORE_OFFSETS,
            Neighborhood::Cardinal => &CARDINAL_OFFSETS,
        }
    }
}

/// Every cell of a fixed `width` x `height` world rectangle.
///
/// The domain is fixed at construction; every coordinate inside the rectangle
/// has a cell and nothing outside it can be read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of dead cells
    pub fn new(width: usize, height: usize) -> Result<Self, SimulationError> {
        Self::filled(width, height, Cell::new(false))
    }

    /// Create a grid with every position set to `cell`
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, SimulationError> {
        let len = Self::checked_len(width, height)
            .ok_or(SimulationError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![cell; len],
        })
    }

    /// Cell count of a `width` x `height` world, if such a world may exist.
    ///
    /// Both sides are positive and the product stays within [`MAX_CELLS`],
    /// which also keeps every coordinate within `i32`.
    pub fn checked_len(width: usize, height: usize) -> Option<usize> {
        if width == 0 || height == 0 {
            return None;
        }
        width.checked_mul(height).filter(|&len| len <= MAX_CELLS)
    }

    /// Create a grid from rows of alive flags, `rows[y][x]`
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, SimulationError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(SimulationError::InvalidDimensions { width, height });
        }

        let mut grid = Self::new(width, height)?;
        grid.cells = rows.into_iter().flatten().map(Cell::new).collect();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of entries, alive or dead
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.index(point).is_some()
    }

    /// Row-major storage index for `point`
    #[inline]
    pub fn index(&self, point: Point) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Coordinate stored at a row-major index
    #[inline]
    pub fn point_at(&self, index: usize) -> Point {
        // Dimensions are checked to fit in i32 at construction
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Whether `point` lies on the min/max row or column
    pub fn is_boundary(&self, point: Point) -> bool {
        self.contains(point)
            && (point.x == 0
                || point.y == 0
                || point.x as usize == self.width - 1
                || point.y as usize == self.height - 1)
    }

    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.index(point).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, point: Point) -> Option<&mut Cell> {
        self.index(point).map(move |i| &mut self.cells[i])
    }

    /// Replace the cell at `point`
    pub fn set(&mut self, point: Point, cell: Cell) -> Result<(), SimulationError> {
        let (width, height) = (self.width, self.height);
        let slot = self.get_mut(point).ok_or(SimulationError::OutOfBounds {
            point,
            width,
            height,
        })?;
        *slot = cell;
        Ok(())
    }

    /// All coordinates in `Point` order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.width as i32, 0..self.height as i32).map(|(x, y)| Point::new(x, y))
    }

    /// Coordinates that are not on the boundary, in `Point` order
    pub fn interior_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(move |&p| !self.is_boundary(p))
    }

    /// All `(point, cell)` entries in `Point` order
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.points().map(move |p| (p, &self.cells[p.y as usize * self.width + p.x as usize]))
    }

    /// Raw cell storage in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Commit phase: apply every staged action.
    ///
    /// Each cell only reads and writes its own state, so cells are
    /// committed in parallel.
    pub fn commit(&mut self) {
        self.cells.par_iter_mut().for_each(Cell::update_state);
    }

    /// Count living cells around `point`; coordinates outside the world are skipped
    pub fn count_neighbors(&self, point: Point, neighborhood: Neighborhood) -> u8 {
        neighborhood
            .offsets()
            .iter()
            .filter_map(|&(dx, dy)| self.get(point.offset(dx, dy)))
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Coordinates of all living cells in `Point` order
    pub fn living_cells(&self) -> Vec<Point> {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(p, _)| p)
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", if cell.is_alive() { "⬛" } else { "⬜" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::CellAction;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.living_count(), 0);
        assert!(Grid::new(0, 3).is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        assert_eq!(
            Grid::new(2_000_000_000, 2_000_000_000),
            Err(SimulationError::InvalidDimensions {
                width: 2_000_000_000,
                height: 2_000_000_000,
            })
        );
        assert!(Grid::new(usize::MAX, 2).is_err());
        assert!(Grid::new(MAX_CELLS + 1, 1).is_err());
        assert_eq!(Grid::checked_len(MAX_CELLS, 1), Some(MAX_CELLS));
        assert_eq!(Grid::checked_len(4, 0), None);
    }

    #[test]
    fn test_grid_from_rows() {
        let rows = vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.living_count(), 5);
        assert!(grid.get(Point::new(2, 0)).unwrap().is_alive());
        assert!(!grid.get(Point::new(1, 0)).unwrap().is_alive());

        let ragged = vec![vec![true, false], vec![true]];
        assert!(Grid::from_rows(ragged).is_err());
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.get(Point::new(3, 0)).is_none());
        assert!(grid.get(Point::new(-1, 1)).is_none());
        assert_eq!(
            grid.set(Point::new(0, 3), Cell::new(true)),
            Err(SimulationError::OutOfBounds {
                point: Point::new(0, 3),
                width: 3,
                height: 3,
            })
        );
        // Nothing gets inserted by a failed access
        assert_eq!(grid.len(), 9);
    }

    #[test]
    fn test_boundary_detection() {
        let grid = Grid::new(4, 3).unwrap();
        let interior: Vec<Point> = grid.interior_points().collect();
        assert_eq!(interior, vec![Point::new(1, 1), Point::new(2, 1)]);
        assert!(grid.is_boundary(Point::new(3, 1)));
        assert!(grid.is_boundary(Point::new(1, 2)));
        assert!(!grid.is_boundary(Point::new(4, 1)));
    }

    #[test]
    fn test_neighbor_counting() {
        let rows = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_rows(rows).unwrap();

        assert_eq!(grid.count_neighbors(Point::new(1, 1), Neighborhood::Moore), 8);
        assert_eq!(grid.count_neighbors(Point::new(1, 1), Neighborhood::Cardinal), 4);
        // Corner only sees its in-bounds neighbors
        assert_eq!(grid.count_neighbors(Point::new(0, 0), Neighborhood::Moore), 2);
    }

    #[test]
    fn test_commit_applies_staged_actions() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set(Point::new(0, 0), Cell::with_action(false, CellAction::GiveLife)).unwrap();
        grid.set(Point::new(1, 0), Cell::with_action(true, CellAction::Kill)).unwrap();
        grid.set(Point::new(2, 0), Cell::new(true)).unwrap();
        grid.commit();

        assert!(grid.get(Point::new(0, 0)).unwrap().is_alive());
        assert!(!grid.get(Point::new(1, 0)).unwrap().is_alive());
        assert_eq!(grid.get(Point::new(2, 0)).unwrap().age(), 1);
        assert!(grid.cells().iter().all(|c| c.staged_action() == CellAction::NoOp));
    }

    #[test]
    fn test_iteration_order_and_indexing() {
        let grid = Grid::new(3, 2).unwrap();
        let points: Vec<Point> = grid.points().collect();
        assert_eq!(points[0], Point::new(0, 0));
        assert_eq!(points[1], Point::new(0, 1));
        assert_eq!(points[2], Point::new(1, 0));
        for p in grid.points() {
            let index = grid.index(p).unwrap();
            assert_eq!(grid.point_at(index), p);
        }
    }
}

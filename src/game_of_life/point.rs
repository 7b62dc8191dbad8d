//! Grid coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the world rectangle.
///
/// Ordering is lexicographic by `x`, then `y`, which is the order the grid
/// yields its coordinates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by `(dx, dy)`
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_x_then_y() {
        let mut points = vec![
            Point::new(1, 0),
            Point::new(0, 2),
            Point::new(0, 1),
            Point::new(1, -1),
        ];
        points.sort();
        assert_eq!(
            points,
            vec![
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, -1),
                Point::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_offset_and_display() {
        let p = Point::new(2, 3).offset(-1, 1);
        assert_eq!(p, Point::from((1, 4)));
        assert_eq!(p.to_string(), "(1, 4)");
    }
}

//! Grid coordinate type.
//!
//! `Cell` orders lexicographically by `(x, y)`; that order is the documented
//! tie-break wherever two exits score equally.

use std::fmt;

/// A discrete floor-plan coordinate.  `x` grows to the right, `y` downward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Orthogonal (Von Neumann) distance, ignoring walls.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Component-wise mean of `cells`, rounded to the nearest cell.
    ///
    /// Returns `None` for an empty slice.
    pub fn centroid(cells: &[Cell]) -> Option<Cell> {
        if cells.is_empty() {
            return None;
        }
        let n = cells.len() as f64;
        let (sx, sy) = cells
            .iter()
            .fold((0u64, 0u64), |(sx, sy), c| (sx + c.x as u64, sy + c.y as u64));
        Some(Cell {
            x: (sx as f64 / n).round() as u32,
            y: (sy as f64 / n).round() as u32,
        })
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

//! Floor plan representation and text loader.
//!
//! # Text format
//!
//! One line per grid row, one character per cell:
//!
//! | Char        | Meaning                                         |
//! |-------------|-------------------------------------------------|
//! | `W` or `#`  | Wall                                            |
//! | `E`         | Exit                                            |
//! | `.` or ` `  | Corridor (walkable, no room)                    |
//! | other       | Walkable cell belonging to the room of that label |
//!
//! ```text
//! WWWWWWW
//! Waa..bW
//! Waa..bE
//! WWWWWWW
//! ```
//!
//! All rows must have the same length.  Trailing blank lines are ignored.

use std::path::Path;

use ev_core::Cell;

use crate::{SpatialError, SpatialResult};

/// What occupies a floor-plan cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Walkable cell outside any room.
    Corridor,
    /// Walkable cell inside the room with this label.
    Room(char),
    Wall,
    Exit,
}

impl CellKind {
    fn from_char(c: char) -> CellKind {
        match c {
            'W' | '#' => CellKind::Wall,
            'E' => CellKind::Exit,
            '.' | ' ' => CellKind::Corridor,
            label => CellKind::Room(label),
        }
    }

    /// Character used when printing the plan back out.
    pub fn as_char(self) -> char {
        match self {
            CellKind::Corridor => '.',
            CellKind::Room(label) => label,
            CellKind::Wall => 'W',
            CellKind::Exit => 'E',
        }
    }

    #[inline]
    pub fn is_walkable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Walkable and not an exit: somewhere an occupant may be spawned.
    #[inline]
    pub fn is_floor(self) -> bool {
        matches!(self, CellKind::Corridor | CellKind::Room(_))
    }
}

/// A rectangular floor plan in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorPlan {
    pub width:  u32,
    pub height: u32,
    cells:      Vec<CellKind>,
}

impl FloorPlan {
    /// Parse the character-grid format described in the module docs.
    pub fn parse(text: &str) -> SpatialResult<FloorPlan> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|r| r.trim().is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(SpatialError::Parse("floor plan is empty".into()));
        }

        let width = rows[0].chars().count();
        if width == 0 {
            return Err(SpatialError::Parse("first row is empty".into()));
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(SpatialError::Parse(format!(
                    "row {y} has {len} cells, expected {width}"
                )));
            }
            cells.extend(row.chars().map(CellKind::from_char));
        }

        Ok(FloorPlan {
            width:  width as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Read and parse a floor plan file.
    pub fn from_path(path: &Path) -> SpatialResult<FloorPlan> {
        let text = std::fs::read_to_string(path)?;
        FloorPlan::parse(&text)
    }

    /// Number of cells (`width × height`).
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of `cell`.  Caller guarantees `contains(cell)`.
    #[inline]
    pub fn index_of(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    /// Kind of `cell`, or `None` outside the grid.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.contains(cell).then(|| self.cells[self.index_of(cell)])
    }

    /// Room label of `cell`; `None` for corridors, walls, exits, and
    /// out-of-grid coordinates.
    pub fn room(&self, cell: Cell) -> Option<char> {
        match self.kind(cell)? {
            CellKind::Room(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_exit(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Exit)
    }

    /// All cells with their kind, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &kind)| {
            let i = i as u32;
            (Cell::new(i % width, i / width), kind)
        })
    }

    /// Exit cells in row-major order.
    pub fn exits(&self) -> Vec<Cell> {
        self.cells()
            .filter(|&(_, k)| k == CellKind::Exit)
            .map(|(c, _)| c)
            .collect()
    }

    /// Cells where occupants may spawn (corridor and room cells).
    pub fn floor_cells(&self) -> Vec<Cell> {
        self.cells()
            .filter(|&(_, k)| k.is_floor())
            .map(|(c, _)| c)
            .collect()
    }
}

//! Exclusive cell occupancy.
//!
//! The grid is the single authority for "who stands where".  Every mutation
//! goes through [`place`](OccupancyGrid::place), [`vacate`](OccupancyGrid::vacate)
//! or [`relocate`](OccupancyGrid::relocate), each of which checks the target
//! before writing, so two occupants can never share a cell.

use ev_core::{Cell, OccupantId};

use crate::{AgentError, AgentResult};

#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub width:  u32,
    pub height: u32,
    cells:      Vec<Option<OccupantId>>,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    fn slot(&self, cell: Cell) -> AgentResult<usize> {
        if cell.x >= self.width || cell.y >= self.height {
            return Err(AgentError::OutOfGrid(cell));
        }
        Ok(cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Occupant standing on `cell`, if any.  `None` outside the grid.
    pub fn occupant_at(&self, cell: Cell) -> Option<OccupantId> {
        self.slot(cell).ok().and_then(|i| self.cells[i])
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.slot(cell).is_ok_and(|i| self.cells[i].is_none())
    }

    /// Put `id` on an empty `cell`.
    pub fn place(&mut self, cell: Cell, id: OccupantId) -> AgentResult<()> {
        let i = self.slot(cell)?;
        if let Some(by) = self.cells[i] {
            return Err(AgentError::CellOccupied { cell, by });
        }
        self.cells[i] = Some(id);
        Ok(())
    }

    /// Clear `cell`, returning whoever stood there.
    pub fn vacate(&mut self, cell: Cell) -> Option<OccupantId> {
        let i = self.slot(cell).ok()?;
        self.cells[i].take()
    }

    /// Move the occupant on `from` to the empty cell `to`.
    ///
    /// Nothing changes if `to` is occupied.
    pub fn relocate(&mut self, from: Cell, to: Cell) -> AgentResult<()> {
        let src = self.slot(from)?;
        let dst = self.slot(to)?;
        if let Some(by) = self.cells[dst] {
            return Err(AgentError::CellOccupied { cell: to, by });
        }
        self.cells[dst] = self.cells[src].take();
        Ok(())
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

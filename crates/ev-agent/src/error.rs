use ev_core::{Cell, OccupantId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("cell {cell} is already occupied by {by}")]
    CellOccupied { cell: Cell, by: OccupantId },

    #[error("cell {0} is outside the grid")]
    OutOfGrid(Cell),

    #[error("cannot place {requested} occupants on {available} free cells")]
    NotEnoughSpace { requested: usize, available: usize },

    #[error("invalid willingness distribution: {0}")]
    Distribution(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

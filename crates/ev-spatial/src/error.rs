//! Spatial-subsystem error type.

use thiserror::Error;

use ev_core::Cell;

/// Errors produced by `ev-spatial`.
///
/// `Parse`, `NoExit` and `Disconnected` are configuration errors raised while
/// building; `Unreachable` and `NotWalkable` come from path queries.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("floor plan parse error: {0}")]
    Parse(String),

    #[error("floor plan has no exit")]
    NoExit,

    #[error("cell {0} cannot reach any exit")]
    Disconnected(Cell),

    #[error("cell {0} is not walkable")]
    NotWalkable(Cell),

    #[error("no path from {from} to {to}")]
    Unreachable { from: Cell, to: Cell },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

//! Shared error type.
//!
//! Sub-crates define their own error enums and either convert `EvError` into
//! them via `#[from]` or wrap it as one variant.

use thiserror::Error;

use crate::{GroupId, OccupantId};

/// The top-level error type for `ev-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("occupant {0} not found")]
    OccupantNotFound(OccupantId),

    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ev-*` crates.
pub type EvResult<T> = Result<T, EvError>;

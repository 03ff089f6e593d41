//! `ev-core` — foundational types for the `rust_evac` evacuation simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `OccupantId`, `GroupId`, `NodeId`                      |
//! | [`cell`]     | `Cell` grid coordinate, Manhattan distance             |
//! | [`time`]     | `Tick`                                                 |
//! | [`rng`]      | `SimRng` (per-run seeded generator)                    |
//! | [`kind`]     | `OccupantKind` enum                                    |
//! | [`config`]   | `EvacConfig`, `VotingMethod`                           |
//! | [`error`]    | `EvError`, `EvResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{EvacConfig, VotingMethod};
pub use error::{EvError, EvResult};
pub use ids::{GroupId, NodeId, OccupantId};
pub use kind::OccupantKind;
pub use rng::SimRng;
pub use time::Tick;

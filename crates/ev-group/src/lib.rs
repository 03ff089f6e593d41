//! `ev-group` — groups of occupants that decide on an exit together.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`arena`]     | `GroupArena`, `Group`, `GroupKind` (integer-indexed slots)|
//! | [`cluster`]   | Room pass + corridor pass over ungrouped helpers          |
//!
//! Membership is kept consistent in both directions: a group's member list and
//! each member's `Occupant::group` are always updated together, and only the
//! arena mutates them.  Errors use the shared `ev_core::EvError`.

pub mod arena;
pub mod cluster;


pub use arena::{Group, GroupArena, GroupKind};
pub use cluster::{ClusterParams, cluster};

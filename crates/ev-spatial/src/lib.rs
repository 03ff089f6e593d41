//! `ev-spatial` — floor plan, cell graph, and pathfinding.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                       |
//! |-----------|----------------------------------------------------------------|
//! | [`plan`]  | `FloorPlan`, `CellKind` — the parsed character grid            |
//! | [`graph`] | `SpatialGraph` (CSR adjacency + per-exit distance fields)      |
//! | [`path`]  | shortest-path, nearest-exit, and bounded-radius queries        |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                             |
//!
//! The graph is built once per floor plan and never mutated afterwards, so a
//! single `SpatialGraph` can be shared (e.g. behind an `Arc`) by every run of
//! a batch.

pub mod error;
pub mod graph;
pub mod path;
pub mod plan;


pub use error::{SpatialError, SpatialResult};
pub use graph::{DistanceField, SpatialGraph};
pub use plan::{CellKind, FloorPlan};

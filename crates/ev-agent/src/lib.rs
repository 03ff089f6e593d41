//! `ev-agent` — occupant storage and activation for the `rust_evac` simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`occupant`]    | `Occupant` — one simulated person                         |
//! | [`registry`]    | `OccupantRegistry` (live set + randomized activation)     |
//! | [`grid`]        | `OccupancyGrid` (exclusive cell occupancy)                |
//! | [`builder`]     | `PopulationBuilder` (spawn at random empty cells)         |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                            |
//!
//! The registry is pure membership bookkeeping plus activation order; it holds
//! no pathfinding logic.  Movement is applied by `ev-sim`.

pub mod builder;
pub mod error;
pub mod grid;
pub mod occupant;
pub mod registry;


pub use builder::PopulationBuilder;
pub use error::{AgentError, AgentResult};
pub use grid::OccupancyGrid;
pub use occupant::Occupant;
pub use registry::OccupantRegistry;

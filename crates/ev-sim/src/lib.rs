//! `ev-sim` — tick loop orchestrator for the `rust_evac` simulator.
//!
//! # Tick loop
//!
//! ```text
//! Setup: validate config, build graph, spawn population
//! loop:
//!   ① Negotiating — every stranded dependent calls for a helper
//!   ② Clustering  — ungrouped helpers join room / corridor groups
//!   ③ Voting      — every group without a target elects an exit
//!   ④ Stepping    — occupants move in shuffled order; collisions between
//!                   groups heading for different exits merge + revote
//!   ⑤ Check       — empty → AllEvacuated, only stranded dependents left →
//!                   Stalled, step budget used → StepBudget
//! ```
//!
//! Each phase is idempotent when nothing changed since the previous tick, so
//! all five run every tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`run_batch`] executes runs on Rayon's thread pool.    |
//! | `serde`    | Serialize derives on `RunRecord` and friends.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::EvacConfig;
//! use ev_sim::{NoopObserver, SimBuilder};
//! use ev_spatial::FloorPlan;
//!
//! let plan = FloorPlan::from_path("plans/office.txt".as_ref())?;
//! let mut sim = SimBuilder::new(EvacConfig::default(), plan).build()?;
//! let record = sim.run(&mut NoopObserver)?;
//! println!("{} evacuated in {} ticks", record.evacuated(), record.total_ticks);
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod movement;
pub mod observer;
pub mod phase;
pub mod record;
pub mod render;
pub mod sim;

#[cfg(test)]
mod tests;

pub use batch::run_batch;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use phase::Phase;
pub use record::{Evacuation, RunRecord, Termination};
pub use render::render_ascii;
pub use sim::Sim;

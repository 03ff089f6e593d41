//! Simulation observer trait for progress reporting and data collection.

use ev_core::{GroupId, Tick};
use ev_negotiate::Award;

use crate::{Evacuation, RunRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, remaining: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {remaining} occupants inside");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before negotiation.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the number of occupants still
    /// inside.
    fn on_tick_end(&mut self, _tick: Tick, _remaining: usize) {}

    /// An occupant stepped onto an exit.
    fn on_evacuated(&mut self, _evacuation: &Evacuation) {}

    /// Negotiation bound a dependent to a helper.
    fn on_pair_formed(&mut self, _tick: Tick, _award: &Award) {}

    /// A collision merged groups `a` and `b` into `merged`.
    fn on_merge(&mut self, _tick: Tick, _a: GroupId, _b: GroupId, _merged: GroupId) {}

    /// Called once after the run terminates.
    fn on_sim_end(&mut self, _record: &RunRecord) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

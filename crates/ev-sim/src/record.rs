//! Per-run results.

use std::fmt;

use ev_core::{Cell, OccupantId, Tick};

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// Nobody is left in the building.
    AllEvacuated,
    /// Only immobile, unpaired dependents remain.
    Stalled,
    /// `step_budget` ticks elapsed first.
    StepBudget,
}

impl Termination {
    pub fn as_str(self) -> &'static str {
        match self {
            Termination::AllEvacuated => "all_evacuated",
            Termination::Stalled      => "stalled",
            Termination::StepBudget   => "step_budget",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occupant leaving through an exit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evacuation {
    pub occupant: OccupantId,
    pub exit:     Cell,
    /// Tick (0-based) during which the occupant stepped onto the exit.
    pub tick:     Tick,
}

/// Outcome of a single run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    /// Position of this run within its batch.
    pub run_index:   usize,
    /// Master seed of the batch.  The run's RNG is
    /// `SimRng::for_run(seed, run_index)`.
    pub seed:        u64,
    /// Evacuations in the order they happened.
    pub evacuations: Vec<Evacuation>,
    /// Number of ticks processed.
    pub total_ticks: u64,
    /// Occupants still inside when the run stopped.
    pub left_behind: usize,
    pub termination: Termination,
}

impl RunRecord {
    pub fn evacuated(&self) -> usize {
        self.evacuations.len()
    }

    /// Evacuation tick of every evacuated occupant, in evacuation order.
    pub fn evac_ticks(&self) -> Vec<u64> {
        self.evacuations.iter().map(|e| e.tick.0).collect()
    }

    /// Mean evacuation tick; `None` if nobody got out.
    pub fn avg_evac_time(&self) -> Option<f64> {
        if self.evacuations.is_empty() {
            return None;
        }
        let sum: u64 = self.evacuations.iter().map(|e| e.tick.0).sum();
        Some(sum as f64 / self.evacuations.len() as f64)
    }
}

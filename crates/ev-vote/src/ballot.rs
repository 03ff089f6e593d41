//! Per-voter ballots and vote parameters.

use ev_core::{Cell, EvacConfig};
use ev_spatial::SpatialGraph;

/// One voter's view of the exits: every reachable exit with its walking
/// distance, nearest first, equal distances by cell order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExitBallot {
    pub exits: Vec<(Cell, u32)>,
}

impl ExitBallot {
    /// Ballot for a voter standing on `from`.
    pub fn from_graph(graph: &SpatialGraph, from: Cell) -> Self {
        Self { exits: graph.exits_sorted_by_distance(from) }
    }

    /// Build from an already-collected list; sorts it.
    pub fn new(mut exits: Vec<(Cell, u32)>) -> Self {
        exits.sort_unstable_by_key(|&(exit, d)| (d, exit));
        Self { exits }
    }

    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }

    /// Nearest exit and its distance.
    pub fn nearest(&self) -> Option<(Cell, u32)> {
        self.exits.first().copied()
    }
}

/// Inverse-distance preference weight.  A distance of 0 counts as 1.
#[inline]
pub(crate) fn inverse(d: u32) -> f64 {
    1.0 / d.max(1) as f64
}

/// Tunables shared by the three rules.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoteParams {
    /// Plurality exponent α.
    pub steepness:          f64,
    /// Approval multiplier on the nearest distance.
    pub approval_threshold: f64,
    /// Cumulative points per voter.
    pub cumulative_budget:  f64,
}

impl VoteParams {
    pub fn from_config(config: &EvacConfig) -> Self {
        Self {
            steepness:          config.plurality_steepness,
            approval_threshold: config.approval_threshold,
            cumulative_budget:  config.cumulative_budget,
        }
    }
}

impl Default for VoteParams {
    fn default() -> Self {
        Self::from_config(&EvacConfig::default())
    }
}

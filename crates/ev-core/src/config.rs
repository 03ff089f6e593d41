//! Run configuration.
//!
//! `EvacConfig` holds every scalar parameter of a run.  Applications usually
//! load it from JSON (enable the `serde` feature) and hand it to the
//! simulation builder, which calls [`EvacConfig::validate`] before Setup.

use std::fmt;
use std::str::FromStr;

use crate::{EvError, EvResult};

// ── VotingMethod ──────────────────────────────────────────────────────────────

/// Selects the group-decision rule used to pick a shared target exit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VotingMethod {
    /// One sampled vote per member; most votes wins.
    #[default]
    Plurality,
    /// Members approve every exit close enough to their nearest; most
    /// approvals wins.
    Approval,
    /// Members spread a fixed point budget over all exits; highest total wins.
    Cumulative,
}

impl VotingMethod {
    pub const ALL: [VotingMethod; 3] =
        [VotingMethod::Plurality, VotingMethod::Approval, VotingMethod::Cumulative];

    pub fn as_str(self) -> &'static str {
        match self {
            VotingMethod::Plurality  => "plurality",
            VotingMethod::Approval   => "approval",
            VotingMethod::Cumulative => "cumulative",
        }
    }
}

impl fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VotingMethod {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plurality"  => Ok(VotingMethod::Plurality),
            "approval"   => Ok(VotingMethod::Approval),
            "cumulative" => Ok(VotingMethod::Cumulative),
            other => Err(EvError::Config(format!(
                "unknown voting method {other:?}: expected \"plurality\", \"approval\", or \"cumulative\""
            ))),
        }
    }
}

// ── EvacConfig ────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvacConfig {
    /// Total occupants spawned at Setup (helpers + dependents).
    pub occupant_count: usize,

    /// Fraction of occupants that are helper-capable, in [0, 1].
    pub helper_ratio: f64,

    /// Mean of the normal distribution willingness is drawn from.
    pub willingness_mean: f64,

    /// Standard deviation of the willingness distribution.  0 makes every
    /// helper's willingness equal to the mean.
    pub willingness_std: f64,

    /// Group-decision rule.
    pub voting_method: VotingMethod,

    /// Max shortest-path distance within which a dependent seeks helpers.
    pub call_radius: u32,

    /// Max Manhattan distance from a corridor group's centroid searched for
    /// new members.
    pub cluster_radius: u32,

    /// Upper bound on corridor-group growth iterations.
    pub cluster_max_iterations: u32,

    /// Approval voting: approve exits within `threshold × nearest` distance.
    pub approval_threshold: f64,

    /// Plurality voting exponent α in `(1/d)^α`.
    pub plurality_steepness: f64,

    /// Cumulative voting: points each member distributes.
    pub cumulative_budget: f64,

    /// Cells per tick for an unpaired helper.
    pub helper_speed: u32,

    /// Cells per tick for both members of a pair.
    pub paired_speed: u32,

    /// Maximum ticks before a run is cut off.
    pub step_budget: u64,

    /// Number of independent runs in a batch.
    pub batch_count: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for EvacConfig {
    fn default() -> Self {
        Self {
            occupant_count:         250,
            helper_ratio:           0.95,
            willingness_mean:       0.5,
            willingness_std:        0.2,
            voting_method:          VotingMethod::Plurality,
            call_radius:            6,
            cluster_radius:         3,
            cluster_max_iterations: 10,
            approval_threshold:     1.5,
            plurality_steepness:    3.0,
            cumulative_budget:      1.0,
            helper_speed:           2,
            paired_speed:           1,
            step_budget:            10_000,
            batch_count:            1,
            seed:                   42,
        }
    }
}

impl EvacConfig {
    /// Number of helper-capable occupants spawned.
    pub fn helper_count(&self) -> usize {
        ((self.occupant_count as f64) * self.helper_ratio).round() as usize
    }

    /// Number of dependent occupants spawned (the remainder).
    pub fn dependent_count(&self) -> usize {
        self.occupant_count - self.helper_count().min(self.occupant_count)
    }

    /// Reject parameter values the simulation cannot run with.
    pub fn validate(&self) -> EvResult<()> {
        fn fail<T>(msg: String) -> EvResult<T> {
            Err(EvError::Config(msg))
        }

        if !(0.0..=1.0).contains(&self.helper_ratio) {
            return fail(format!("helper_ratio must be in [0, 1], got {}", self.helper_ratio));
        }
        if !self.willingness_mean.is_finite() {
            return fail("willingness_mean must be finite".into());
        }
        if !self.willingness_std.is_finite() || self.willingness_std < 0.0 {
            return fail(format!(
                "willingness_std must be finite and non-negative, got {}",
                self.willingness_std
            ));
        }
        if !self.approval_threshold.is_finite() || self.approval_threshold < 1.0 {
            return fail(format!(
                "approval_threshold must be >= 1.0, got {}",
                self.approval_threshold
            ));
        }
        if !self.plurality_steepness.is_finite() || self.plurality_steepness < 0.0 {
            return fail(format!(
                "plurality_steepness must be finite and non-negative, got {}",
                self.plurality_steepness
            ));
        }
        if !self.cumulative_budget.is_finite() || self.cumulative_budget <= 0.0 {
            return fail(format!(
                "cumulative_budget must be positive, got {}",
                self.cumulative_budget
            ));
        }
        if self.helper_speed == 0 {
            return fail("helper_speed must be at least 1".into());
        }
        if self.paired_speed == 0 {
            return fail("paired_speed must be at least 1".into());
        }
        if self.cluster_max_iterations == 0 {
            return fail("cluster_max_iterations must be at least 1".into());
        }
        if self.batch_count == 0 {
            return fail("batch_count must be at least 1".into());
        }
        Ok(())
    }
}

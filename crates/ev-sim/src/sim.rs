//! The `Sim` struct and its tick loop.

use std::fmt;
use std::sync::Arc;

use ev_agent::{OccupancyGrid, OccupantRegistry};
use ev_core::{EvacConfig, SimRng, Tick};
use ev_group::{ClusterParams, GroupArena, cluster};
use ev_negotiate::{NegotiationParams, negotiate};
use ev_spatial::{FloorPlan, SpatialGraph};
use ev_vote::{VoteParams, vote_group};

use crate::{Evacuation, Phase, RunRecord, SimObserver, SimResult, Termination};

/// The main simulation runner.
///
/// `Sim` owns one run's mutable state (population, occupancy, groups, RNG)
/// and shares the immutable floor plan and graph with any sibling runs.
///
/// Every tick runs four phases in order:
///
/// 1. **Negotiating**: stranded dependents call for helpers; awards become
///    pairs.
/// 2. **Clustering**: ungrouped helpers are grouped by room or proximity.
/// 3. **Voting**: groups without a target elect one.
/// 4. **Stepping**: occupants move in this tick's shuffled activation order.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration, validated by the builder.
    pub config: EvacConfig,

    /// Position of this run within its batch.
    pub run_index: usize,

    pub(crate) plan:  Arc<FloorPlan>,
    pub(crate) graph: Arc<SpatialGraph>,

    pub(crate) registry: OccupantRegistry,
    pub(crate) grid:     OccupancyGrid,
    pub(crate) arena:    GroupArena,
    pub(crate) rng:      SimRng,

    pub(crate) tick:        Tick,
    pub(crate) phase:       Phase,
    pub(crate) evacuations: Vec<Evacuation>,
    pub(crate) termination: Option<Termination>,

    pub(crate) cluster_params:     ClusterParams,
    pub(crate) vote_params:        VoteParams,
    pub(crate) negotiation_params: NegotiationParams,
}

impl fmt::Debug for Sim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sim")
            .field("run_index", &self.run_index)
            .field("tick", &self.tick)
            .field("phase", &self.phase)
            .field("remaining", &self.registry.len())
            .field("groups", &self.arena.len())
            .field("evacuated", &self.evacuations.len())
            .field("termination", &self.termination)
            .finish_non_exhaustive()
    }
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a termination condition holds and return the run's record.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunRecord> {
        if self.termination.is_none() {
            self.termination = self.initial_termination();
        }
        let termination = loop {
            if let Some(t) = self.termination {
                break t;
            }
            self.tick_once(observer)?;
        };
        self.phase = Phase::Terminated;

        let record = self.build_record(termination);
        log::info!(
            "run {} ended ({}) after {} ticks: {} evacuated, {} left behind",
            record.run_index,
            record.termination,
            record.total_ticks,
            record.evacuated(),
            record.left_behind,
        );
        observer.on_sim_end(&record);
        Ok(record)
    }

    /// Run at most `n` ticks, stopping early if the run terminates.
    ///
    /// Useful for tests and incremental stepping.  Returns the termination
    /// reason once there is one.
    pub fn run_ticks<O: SimObserver>(
        &mut self,
        n: u64,
        observer: &mut O,
    ) -> SimResult<Option<Termination>> {
        if self.termination.is_none() {
            self.termination = self.initial_termination();
        }
        for _ in 0..n {
            if self.termination.is_some() {
                break;
            }
            self.tick_once(observer)?;
        }
        Ok(self.termination)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Ticks processed so far (also the index of the next tick).
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn graph(&self) -> &SpatialGraph {
        &self.graph
    }

    pub fn registry(&self) -> &OccupantRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn arena(&self) -> &GroupArena {
        &self.arena
    }

    pub fn evacuations(&self) -> &[Evacuation] {
        &self.evacuations
    }

    /// The run's record, once it has terminated.
    pub fn record(&self) -> Option<RunRecord> {
        self.termination.map(|t| self.build_record(t))
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        self.tick = now.next();
        observer.on_tick_end(now, self.registry.len());

        self.termination = self.check_termination();
        if self.termination.is_some() {
            self.phase = Phase::Terminated;
        }
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: negotiation ──────────────────────────────────────────
        self.phase = Phase::Negotiating;
        let awards = negotiate(
            &mut self.arena,
            &mut self.registry,
            &self.graph,
            &self.negotiation_params,
            &mut self.rng,
        )?;
        for award in &awards {
            observer.on_pair_formed(now, award);
        }

        // ── Phase 2: clustering ───────────────────────────────────────────
        self.phase = Phase::Clustering;
        cluster(&mut self.arena, &mut self.registry, &self.plan, self.cluster_params)?;

        // ── Phase 3: voting ───────────────────────────────────────────────
        self.phase = Phase::Voting;
        for group in self.arena.unvoted() {
            vote_group(
                &mut self.arena,
                &mut self.registry,
                &self.graph,
                group,
                self.config.voting_method,
                &self.vote_params,
                &mut self.rng,
            )?;
        }

        // ── Phase 4: stepping ─────────────────────────────────────────────
        //
        // Order is fixed at the start of the phase.  An occupant that
        // evacuates is simply absent when its turn comes.
        self.phase = Phase::Stepping;
        let order = self.registry.activation_order(&mut self.rng);
        for id in order {
            self.step_occupant(id, now, observer)?;
        }
        Ok(())
    }

    fn initial_termination(&self) -> Option<Termination> {
        if self.registry.is_empty() {
            Some(Termination::AllEvacuated)
        } else if self.config.step_budget == 0 {
            Some(Termination::StepBudget)
        } else {
            None
        }
    }

    fn check_termination(&self) -> Option<Termination> {
        if self.registry.is_empty() {
            Some(Termination::AllEvacuated)
        } else if self.registry.is_stalled() {
            Some(Termination::Stalled)
        } else if self.tick.0 >= self.config.step_budget {
            Some(Termination::StepBudget)
        } else {
            None
        }
    }

    fn build_record(&self, termination: Termination) -> RunRecord {
        RunRecord {
            run_index:   self.run_index,
            seed:        self.config.seed,
            evacuations: self.evacuations.clone(),
            total_ticks: self.tick.0,
            left_behind: self.registry.len(),
            termination,
        }
    }
}

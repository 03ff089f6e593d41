//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use ev_agent::{OccupancyGrid, OccupantRegistry, PopulationBuilder};
use ev_core::{EvacConfig, SimRng, Tick};
use ev_group::{ClusterParams, GroupArena};
use ev_negotiate::NegotiationParams;
use ev_spatial::{FloorPlan, SpatialGraph};
use ev_vote::VoteParams;

use crate::{Phase, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`EvacConfig`] — population, voting method, radii, speeds, budget, seed
/// - [`FloorPlan`] — owned or already shared behind an `Arc`
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                        |
/// |----------------------|------------------------------------------------|
/// | `.graph(g)`          | Built from the plan                            |
/// | `.run_index(i)`      | 0                                              |
/// | `.population(r, g)`  | Spawned at random from the config              |
///
/// # Example
///
/// ```rust,ignore
/// let graph = Arc::new(SpatialGraph::from_plan(&plan)?);
/// let mut sim = SimBuilder::new(config, plan)
///     .graph(graph)
///     .run_index(3)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     EvacConfig,
    plan:       Arc<FloorPlan>,
    graph:      Option<Arc<SpatialGraph>>,
    population: Option<(OccupantRegistry, OccupancyGrid)>,
    run_index:  usize,
}

impl SimBuilder {
    pub fn new(config: EvacConfig, plan: impl Into<Arc<FloorPlan>>) -> Self {
        Self {
            config,
            plan: plan.into(),
            graph: None,
            population: None,
            run_index: 0,
        }
    }

    /// Reuse a graph already built from the same plan (batch runs share one).
    pub fn graph(mut self, graph: Arc<SpatialGraph>) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Select run `i` of a batch; its RNG is derived from the master seed and `i`.
    pub fn run_index(mut self, i: usize) -> Self {
        self.run_index = i;
        self
    }

    /// Supply a hand-placed population instead of random spawning.
    ///
    /// Every occupant must stand on a floor cell of the plan and be recorded
    /// on `grid` at that cell.
    pub fn population(mut self, registry: OccupantRegistry, grid: OccupancyGrid) -> Self {
        self.population = Some((registry, grid));
        self
    }

    /// Validate inputs, build the graph and population, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let graph = match self.graph {
            Some(g) => {
                if (g.width, g.height) != (self.plan.width, self.plan.height) {
                    return Err(SimError::Config(format!(
                        "graph is {}x{} but the floor plan is {}x{}",
                        g.width, g.height, self.plan.width, self.plan.height
                    )));
                }
                g
            }
            None => Arc::new(SpatialGraph::from_plan(&self.plan)?),
        };

        let mut rng = SimRng::for_run(self.config.seed, self.run_index as u64);

        let (registry, grid) = match self.population {
            Some((registry, grid)) => {
                check_population(&self.plan, &registry, &grid)?;
                (registry, grid)
            }
            None => PopulationBuilder::from_config(&self.plan, &self.config).build(&mut rng)?,
        };

        log::debug!(
            "run {}: {} occupants on a {}x{} plan with {} exits",
            self.run_index,
            registry.len(),
            self.plan.width,
            self.plan.height,
            graph.exits().len(),
        );

        Ok(Sim {
            cluster_params:     ClusterParams::from_config(&self.config),
            vote_params:        VoteParams::from_config(&self.config),
            negotiation_params: NegotiationParams::from_config(&self.config),
            config:             self.config,
            run_index:          self.run_index,
            plan:               self.plan,
            graph,
            registry,
            grid,
            arena:              GroupArena::new(),
            rng,
            tick:               Tick::ZERO,
            phase:              Phase::Setup,
            evacuations:        Vec::new(),
            termination:        None,
        })
    }
}

fn check_population(
    plan: &FloorPlan,
    registry: &OccupantRegistry,
    grid: &OccupancyGrid,
) -> SimResult<()> {
    if (grid.width, grid.height) != (plan.width, plan.height) {
        return Err(SimError::Config(format!(
            "occupancy grid is {}x{} but the floor plan is {}x{}",
            grid.width, grid.height, plan.width, plan.height
        )));
    }
    for o in registry.iter() {
        if !plan.kind(o.cell).is_some_and(|k| k.is_floor()) {
            return Err(SimError::Config(format!("{} placed on non-floor cell {}", o.id, o.cell)));
        }
        if grid.occupant_at(o.cell) != Some(o.id) {
            return Err(SimError::Config(format!("{} is not on the grid at {}", o.id, o.cell)));
        }
    }
    if grid.occupied() != registry.len() {
        return Err(SimError::Config(format!(
            "grid holds {} occupants but the registry has {}",
            grid.occupied(),
            registry.len()
        )));
    }
    Ok(())
}

//! Fluent builder that spawns a population onto a floor plan.
//!
//! # Usage
//!
//! ```rust
//! use ev_agent::PopulationBuilder;
//! use ev_core::SimRng;
//! use ev_spatial::FloorPlan;
//!
//! let plan = FloorPlan::parse("WWWWW\nW...E\nWWWWW\n").unwrap();
//! let mut rng = SimRng::new(7);
//! let (registry, grid) = PopulationBuilder::new(&plan)
//!     .helpers(2)
//!     .dependents(1)
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(registry.len(), 3);
//! assert_eq!(grid.occupied(), 3);
//! ```

use rand::Rng;
use rand_distr::Normal;

use ev_core::{EvacConfig, SimRng};
use ev_spatial::FloorPlan;

use crate::{AgentError, AgentResult, OccupancyGrid, Occupant, OccupantRegistry};

/// Fluent builder for [`OccupantRegistry`] + [`OccupancyGrid`].
///
/// Helpers are spawned first, then dependents, each on a distinct floor cell
/// chosen uniformly at random.  Exit cells are never used as spawn points.
pub struct PopulationBuilder<'a> {
    plan:             &'a FloorPlan,
    helpers:          usize,
    dependents:       usize,
    helper_speed:     u32,
    willingness_mean: f64,
    willingness_std:  f64,
}

impl<'a> PopulationBuilder<'a> {
    pub fn new(plan: &'a FloorPlan) -> Self {
        let defaults = EvacConfig::default();
        Self {
            plan,
            helpers:          0,
            dependents:       0,
            helper_speed:     defaults.helper_speed,
            willingness_mean: defaults.willingness_mean,
            willingness_std:  defaults.willingness_std,
        }
    }

    /// Take population size, helper ratio, speed and willingness from `config`.
    pub fn from_config(plan: &'a FloorPlan, config: &EvacConfig) -> Self {
        Self::new(plan)
            .helpers(config.helper_count())
            .dependents(config.dependent_count())
            .helper_speed(config.helper_speed)
            .willingness(config.willingness_mean, config.willingness_std)
    }

    pub fn helpers(mut self, n: usize) -> Self {
        self.helpers = n;
        self
    }

    pub fn dependents(mut self, n: usize) -> Self {
        self.dependents = n;
        self
    }

    pub fn helper_speed(mut self, speed: u32) -> Self {
        self.helper_speed = speed;
        self
    }

    /// Normal distribution helper willingness is drawn from.  Samples are
    /// clamped to [0, 1].
    pub fn willingness(mut self, mean: f64, std: f64) -> Self {
        self.willingness_mean = mean;
        self.willingness_std = std;
        self
    }

    /// Spawn the population.
    ///
    /// # Errors
    ///
    /// - [`AgentError::NotEnoughSpace`] if the plan has fewer floor cells than
    ///   occupants requested.
    /// - [`AgentError::Distribution`] if the willingness parameters are not a
    ///   valid normal distribution.
    pub fn build(self, rng: &mut SimRng) -> AgentResult<(OccupantRegistry, OccupancyGrid)> {
        let requested = self.helpers + self.dependents;
        let mut spawn_cells = self.plan.floor_cells();
        if spawn_cells.len() < requested {
            return Err(AgentError::NotEnoughSpace {
                requested,
                available: spawn_cells.len(),
            });
        }

        let normal = Normal::new(self.willingness_mean, self.willingness_std)
            .map_err(|e| AgentError::Distribution(e.to_string()))?;

        rng.shuffle(&mut spawn_cells);
        let mut cells = spawn_cells.into_iter().take(requested);

        let mut registry = OccupantRegistry::new();
        let mut grid = OccupancyGrid::new(self.plan.width, self.plan.height);

        for cell in cells.by_ref().take(self.helpers) {
            let willingness: f64 = rng.inner().sample(normal);
            let id = registry.add(Occupant::helper(cell, self.helper_speed, willingness));
            grid.place(cell, id)?;
        }
        for cell in cells {
            let id = registry.add(Occupant::dependent(cell));
            grid.place(cell, id)?;
        }

        Ok((registry, grid))
    }
}

//! Independent runs over one floor plan.

use std::sync::Arc;

use ev_core::EvacConfig;
use ev_spatial::{FloorPlan, SpatialGraph};

use crate::{NoopObserver, RunRecord, SimBuilder, SimResult};

/// Execute `config.batch_count` runs and return their records in run order.
///
/// The graph is built once and shared.  Run `i` seeds its RNG from
/// `config.seed` and `i`, so each record is reproducible on its own.  With
/// the `parallel` feature the runs execute on Rayon's thread pool; results
/// are identical either way.
pub fn run_batch(config: &EvacConfig, plan: &FloorPlan) -> SimResult<Vec<RunRecord>> {
    config.validate()?;
    let plan = Arc::new(plan.clone());
    let graph = Arc::new(SpatialGraph::from_plan(&plan)?);

    let run_one = |i: usize| -> SimResult<RunRecord> {
        SimBuilder::new(config.clone(), Arc::clone(&plan))
            .graph(Arc::clone(&graph))
            .run_index(i)
            .build()?
            .run(&mut NoopObserver)
    };

    #[cfg(not(feature = "parallel"))]
    {
        (0..config.batch_count).map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..config.batch_count).into_par_iter().map(run_one).collect()
    }
}

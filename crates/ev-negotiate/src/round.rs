//! One negotiation round over every stranded dependent.

use ev_agent::OccupantRegistry;
use ev_core::{EvResult, EvacConfig, OccupantId, SimRng};
use ev_group::GroupArena;
use ev_spatial::SpatialGraph;
use ev_vote::{ExitBallot, plurality};

use crate::{Award, call_for_proposals};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NegotiationParams {
    /// Max walking distance from a dependent to a candidate helper.
    pub call_radius:  u32,
    /// Speed of both pair members after the award.
    pub paired_speed: u32,
    /// Plurality exponent used for the dependent's own exit choice.
    pub steepness:    f64,
}

impl NegotiationParams {
    pub fn from_config(config: &EvacConfig) -> Self {
        Self {
            call_radius:  config.call_radius,
            paired_speed: config.paired_speed,
            steepness:    config.plurality_steepness,
        }
    }
}

impl Default for NegotiationParams {
    fn default() -> Self {
        Self::from_config(&EvacConfig::default())
    }
}

/// Run one round and bind every award as a pair.
///
/// Returns the awards in the order they were made.  An empty result is a
/// normal outcome (no dependents, no exits in reach, nobody willing).
pub fn negotiate(
    arena: &mut GroupArena,
    registry: &mut OccupantRegistry,
    graph: &SpatialGraph,
    params: &NegotiationParams,
    rng: &mut SimRng,
) -> EvResult<Vec<Award>> {
    let stranded: Vec<OccupantId> = registry
        .iter()
        .filter(|o| o.is_stranded())
        .map(|o| o.id)
        .collect();

    let mut awards = Vec::new();
    for dependent in stranded {
        let Some(cell) = registry.get(dependent).map(|o| o.cell) else {
            continue;
        };
        let ballot = ExitBallot::from_graph(graph, cell);
        let Some(exit) = plurality::sample_exit(&ballot, params.steepness, rng) else {
            continue;
        };
        if let Some(o) = registry.get_mut(dependent) {
            o.target_exit = Some(exit);
        }

        let Some(award) = call_for_proposals(registry, graph, dependent, exit, params.call_radius)
        else {
            log::trace!("{dependent} found no willing helper");
            continue;
        };
        bind(arena, registry, &award, params.paired_speed)?;
        log::debug!(
            "paired {} with helper {} toward {} (bid {})",
            award.dependent, award.helper, award.exit, award.bid
        );
        awards.push(award);
    }
    Ok(awards)
}

/// Turn an award into a permanent pair.
fn bind(
    arena: &mut GroupArena,
    registry: &mut OccupantRegistry,
    award: &Award,
    paired_speed: u32,
) -> EvResult<()> {
    arena.form_pair(registry, award.dependent, award.helper, award.exit)?;
    for (me, partner) in [(award.dependent, award.helper), (award.helper, award.dependent)] {
        if let Some(o) = registry.get_mut(me) {
            o.partner = Some(partner);
            o.speed = paired_speed;
            o.target_exit = Some(award.exit);
        }
    }
    Ok(())
}

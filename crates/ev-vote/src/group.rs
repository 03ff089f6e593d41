//! Method dispatch and group-level voting.

use ev_agent::OccupantRegistry;
use ev_core::{Cell, EvError, EvResult, GroupId, SimRng, VotingMethod};
use ev_group::GroupArena;
use ev_spatial::SpatialGraph;

use crate::{approval, cumulative, plurality, ExitBallot, VoteParams};

/// Aggregate `ballots` under `method`.  `None` if no ballot names an exit.
pub fn elect(
    method: VotingMethod,
    ballots: &[ExitBallot],
    params: &VoteParams,
    rng: &mut SimRng,
) -> Option<Cell> {
    match method {
        VotingMethod::Plurality  => plurality::elect(ballots, params.steepness, rng),
        VotingMethod::Approval   => approval::elect(ballots, params.approval_threshold),
        VotingMethod::Cumulative => cumulative::elect(ballots, params.cumulative_budget),
    }
}

/// Collect a ballot from every member of `group`, elect an exit and write it
/// to the group and all its members.
///
/// Returns the chosen exit, or `None` (leaving everything untouched) when no
/// member can reach any exit.
pub fn vote_group(
    arena: &mut GroupArena,
    registry: &mut OccupantRegistry,
    graph: &SpatialGraph,
    group: GroupId,
    method: VotingMethod,
    params: &VoteParams,
    rng: &mut SimRng,
) -> EvResult<Option<Cell>> {
    let members = arena.get(group).ok_or(EvError::GroupNotFound(group))?.members();
    let ballots: Vec<ExitBallot> = members
        .iter()
        .filter_map(|&m| registry.get(m))
        .map(|o| ExitBallot::from_graph(graph, o.cell))
        .filter(|b| !b.is_empty())
        .collect();

    let Some(exit) = elect(method, &ballots, params, rng) else {
        return Ok(None);
    };
    arena.set_target(registry, group, exit)?;
    log::trace!("{group} voted {exit} by {method}");
    Ok(Some(exit))
}

//! Single-dependent contract: candidate search, willingness, bidding.

use ev_agent::{Occupant, OccupantRegistry};
use ev_core::{Cell, OccupantId};
use ev_spatial::SpatialGraph;

/// A helper's acceptance rule.
///
/// `m` willingness in [0, 1], `dm` helper → dependent, `dme` dependent → its
/// exit, `dce` helper → its own exit.  All distances in cell steps.
pub fn is_willing(m: f64, dm: u32, dme: u32, dce: u32) -> bool {
    let cost = (1.0 - m) * (dm as f64 / 2.0 + dme as f64);
    cost <= dce as f64 / 2.0
}

/// Winning bid of one call for proposals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Award {
    pub dependent: OccupantId,
    pub helper:    OccupantId,
    /// Exit the pair heads for: the dependent's choice.
    pub exit:      Cell,
    /// The winning helper's distance to the dependent.
    pub bid:       u32,
}

/// Helper's distance to the exit it is currently heading for, or to its
/// nearest exit if it has no target yet.
fn distance_to_own_exit(graph: &SpatialGraph, helper: &Occupant) -> Option<u32> {
    helper
        .target_exit
        .and_then(|exit| graph.path_distance(helper.cell, exit).ok())
        .or_else(|| graph.nearest_exit(helper.cell).map(|(_, d)| d))
}

/// Ask every unpaired helper within `call_radius` of `dependent` to help it
/// reach `exit`, and return the lowest willing bid.
///
/// `None` when the dependent is unknown, cannot reach `exit`, or nobody
/// in range is willing.
pub fn call_for_proposals(
    registry: &OccupantRegistry,
    graph: &SpatialGraph,
    dependent: OccupantId,
    exit: Cell,
    call_radius: u32,
) -> Option<Award> {
    let from = registry.get(dependent)?.cell;
    let dme = graph.path_distance(from, exit).ok()?;
    let reach = graph.distances_within(from, call_radius);

    let mut best: Option<(u32, OccupantId)> = None;
    for helper in registry.iter() {
        if !helper.is_helper() || helper.is_paired() {
            continue;
        }
        let Some(&dm) = reach.get(&helper.cell) else {
            continue;
        };
        let Some(dce) = distance_to_own_exit(graph, helper) else {
            continue;
        };
        let m = helper.willingness.unwrap_or(0.0);
        if !is_willing(m, dm, dme, dce) {
            continue;
        }
        // registry.iter() is in ascending id order: strict < keeps the lowest id.
        if best.is_none_or(|(bid, _)| dm < bid) {
            best = Some((dm, helper.id));
        }
    }

    best.map(|(bid, helper)| Award { dependent, helper, exit, bid })
}

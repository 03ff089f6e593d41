//! Dynamic clustering of ungrouped helper-capable occupants.
//!
//! # Passes
//!
//! 1. **Room pass.**  An occupant on a room-labelled cell joins that room's
//!    group, which is created the first time the label is seen.
//! 2. **Corridor pass.**  Every occupant still ungrouped, in registry order,
//!    seeds a new corridor group.  The group then grows for at most
//!    `max_iterations` rounds: take the centroid of its members, absorb every
//!    ungrouped candidate within Manhattan distance `radius` of it, and stop
//!    early once a round absorbs nobody.
//!
//! The corridor pass is order-dependent: an occupant absorbed by an earlier
//! seed never seeds its own group.
//!
//! # Spatial index
//!
//! Corridor candidates are bulk-loaded into an R-tree keyed by cell.  A radius
//! query is an envelope query on the square `centroid ± radius` followed by an
//! exact Manhattan filter; absorbed occupants are removed from the tree so no
//! one is found twice.

use rstar::{RTree, RTreeObject, AABB};

use ev_agent::OccupantRegistry;
use ev_core::{Cell, EvResult, EvacConfig, GroupId, OccupantId};
use ev_spatial::FloorPlan;

use crate::{GroupArena, GroupKind};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// An ungrouped occupant's position in the corridor index.
#[derive(Clone, Debug, PartialEq)]
struct Candidate {
    point: [i64; 2], // [x, y]
    id:    OccupantId,
}

impl RTreeObject for Candidate {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClusterParams {
    /// Manhattan search radius around a corridor group's centroid.
    pub radius:         u32,
    /// Maximum growth rounds per corridor group.
    pub max_iterations: u32,
}

impl ClusterParams {
    pub fn from_config(config: &EvacConfig) -> Self {
        Self {
            radius:         config.cluster_radius,
            max_iterations: config.cluster_max_iterations,
        }
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self::from_config(&EvacConfig::default())
    }
}

// ── cluster ───────────────────────────────────────────────────────────────────

/// Run both passes over every clusterable occupant.
///
/// Returns the groups that gained at least one member, in the order they were
/// touched.  Calling it again when nobody is clusterable is a no-op.
pub fn cluster(
    arena: &mut GroupArena,
    registry: &mut OccupantRegistry,
    plan: &FloorPlan,
    params: ClusterParams,
) -> EvResult<Vec<GroupId>> {
    let mut touched = Vec::new();
    let mut corridor = Vec::new();

    let pending: Vec<(OccupantId, Cell)> = registry
        .iter()
        .filter(|o| o.is_clusterable())
        .map(|o| (o.id, o.cell))
        .collect();

    for (id, cell) in pending {
        match plan.room(cell) {
            Some(label) => {
                let group = match arena.room_group(label) {
                    Some(g) => g,
                    None => arena.alloc(GroupKind::Room(label)),
                };
                arena.assign(registry, id, group)?;
                if !touched.contains(&group) {
                    touched.push(group);
                }
            }
            None => corridor.push(Candidate { point: to_point(cell), id }),
        }
    }

    if corridor.is_empty() {
        return Ok(touched);
    }

    let seeds: Vec<Candidate> = corridor.clone();
    let mut index = RTree::bulk_load(corridor);

    for seed in seeds {
        if index.remove(&seed).is_none() {
            continue; // absorbed by an earlier group
        }
        let group = arena.alloc(GroupKind::Corridor);
        arena.assign(registry, seed.id, group)?;
        touched.push(group);

        let mut members = vec![seed.point];
        for _ in 0..params.max_iterations {
            let Some(centre) = centroid(&members) else {
                break;
            };
            let mut found = within_manhattan(&index, centre, params.radius);
            if found.is_empty() {
                break;
            }
            found.sort_unstable_by_key(|c| c.id);
            for c in found {
                index.remove(&c);
                arena.assign(registry, c.id, group)?;
                members.push(c.point);
            }
        }
        log::trace!("corridor {group} formed with {} members", members.len());
    }

    Ok(touched)
}

fn to_point(cell: Cell) -> [i64; 2] {
    [cell.x as i64, cell.y as i64]
}

fn centroid(points: &[[i64; 2]]) -> Option<[i64; 2]> {
    let cells: Vec<Cell> = points
        .iter()
        .map(|p| Cell::new(p[0] as u32, p[1] as u32))
        .collect();
    Cell::centroid(&cells).map(to_point)
}

fn within_manhattan(index: &RTree<Candidate>, centre: [i64; 2], radius: u32) -> Vec<Candidate> {
    let r = radius as i64;
    let square = AABB::from_corners([centre[0] - r, centre[1] - r], [centre[0] + r, centre[1] + r]);
    index
        .locate_in_envelope(&square)
        .filter(|c| (c.point[0] - centre[0]).abs() + (c.point[1] - centre[1]).abs() <= r)
        .cloned()
        .collect()
}

//! Per-occupant stepping: moves, evacuations and collisions.
//!
//! An occupant with a target exit and speed `s` tries to advance up to `s`
//! cells, one at a time, along a shortest path to its target:
//!
//! - stepping onto any exit cell evacuates it (recorded at the current tick);
//! - an occupied next cell is a collision, which ends its movement this tick;
//! - a missing path means it stays put this tick.
//!
//! # Collisions
//!
//! | Situation                                         | Outcome                     |
//! |---------------------------------------------------|-----------------------------|
//! | both heading for the same exit                    | wait                        |
//! | different exits, both in distinct non-pair groups | merge, then revote          |
//! | different exits, a pair against a non-pair group  | group takes the pair's exit |
//! | two pairs, or an ungrouped occupant involved      | wait                        |

use ev_core::{Cell, OccupantId, Tick};
use ev_vote::vote_group;

use crate::{Evacuation, Sim, SimObserver, SimResult};

impl Sim {
    pub(crate) fn step_occupant<O: SimObserver>(
        &mut self,
        id: OccupantId,
        now: Tick,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(occupant) = self.registry.get(id) else {
            return Ok(());
        };
        let (Some(exit), speed) = (occupant.target_exit, occupant.speed) else {
            return Ok(());
        };

        for _ in 0..speed {
            let Some(from) = self.registry.get(id).map(|o| o.cell) else {
                return Ok(());
            };
            let Some(next) = self.graph.next_step_toward_exit(from, exit) else {
                return Ok(());
            };
            if self.graph.is_exit(next) {
                self.evacuate(id, from, next, now, observer);
                return Ok(());
            }
            if let Some(other) = self.grid.occupant_at(next) {
                return self.collide(id, other, now, observer);
            }
            self.grid.relocate(from, next)?;
            if let Some(o) = self.registry.get_mut(id) {
                o.cell = next;
            }
        }
        Ok(())
    }

    fn evacuate<O: SimObserver>(
        &mut self,
        id: OccupantId,
        from: Cell,
        exit: Cell,
        now: Tick,
        observer: &mut O,
    ) {
        self.grid.vacate(from);
        self.arena.remove_member(&mut self.registry, id);
        self.registry.remove(id);

        let evacuation = Evacuation { occupant: id, exit, tick: now };
        self.evacuations.push(evacuation);
        observer.on_evacuated(&evacuation);
    }

    fn collide<O: SimObserver>(
        &mut self,
        mover: OccupantId,
        blocker: OccupantId,
        now: Tick,
        observer: &mut O,
    ) -> SimResult<()> {
        let (Some(a), Some(b)) = (self.registry.get(mover), self.registry.get(blocker)) else {
            return Ok(());
        };
        if a.target_exit == b.target_exit {
            return Ok(());
        }
        let (Some(ga), Some(gb)) = (a.group, b.group) else {
            return Ok(());
        };
        if ga == gb {
            return Ok(());
        }
        let (Some(group_a), Some(group_b)) = (self.arena.get(ga), self.arena.get(gb)) else {
            return Ok(());
        };
        match (group_a.is_pair(), group_b.is_pair()) {
            (false, false) => {}
            (true, true) => return Ok(()),
            (a_is_pair, _) => {
                // Pairs keep their exit; the other group turns around and follows it.
                let (pair, follower) = if a_is_pair { (group_a, gb) } else { (group_b, ga) };
                let Some(exit) = pair.target else {
                    return Ok(());
                };
                self.arena.set_target(&mut self.registry, follower, exit)?;
                log::debug!("{now}: {mover} ran into {blocker}; {follower} now follows pair toward {exit}");
                return Ok(());
            }
        }

        let merged = self.arena.merge(&mut self.registry, ga, gb)?;
        observer.on_merge(now, ga, gb, merged);
        let exit = vote_group(
            &mut self.arena,
            &mut self.registry,
            &self.graph,
            merged,
            self.config.voting_method,
            &self.vote_params,
            &mut self.rng,
        )?;
        log::debug!("{now}: {mover} ran into {blocker}; {ga} + {gb} → {merged} revoted {exit:?}");
        Ok(())
    }
}

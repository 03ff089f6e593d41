//! Integration tests for ev-sim.

use std::collections::HashSet;

use ev_agent::{OccupancyGrid, Occupant, OccupantRegistry};
use ev_core::{Cell, EvacConfig, GroupId, OccupantId, Tick};
use ev_negotiate::Award;
use ev_spatial::FloorPlan;

use crate::{Evacuation, RunRecord, Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Straight corridor, one exit on the left.
const CORRIDOR: &str = "\
WWWWWWWWWW
E........W
WWWWWWWWWW
";

/// Straight corridor with an exit at each end.
const TWO_ENDS: &str = "\
WWWWWWWWW
E.......E
WWWWWWWWW
";

/// Two rooms feeding a corridor, single exit.  Area 50.
const SINGLE_EXIT: &str = "\
WWWWWWWWWW
Waaaa....E
Waaaa....W
Wbbbb....W
WWWWWWWWWW
";

/// Two rooms, two exits.
const OFFICE: &str = "\
WWWWWWWWWWWW
E.aaa..bbb.W
W.aaa..bbb.W
W..........E
WWWWWWWWWWWW
";

fn plan(text: &str) -> FloorPlan {
    FloorPlan::parse(text).unwrap()
}

/// Sim over `text` with occupants placed by hand: `(x, y, is_helper)`.
/// Helpers are fully willing.
fn hand_sim(text: &str, people: &[(u32, u32, bool)], config: EvacConfig) -> Sim {
    let plan = plan(text);
    let mut registry = OccupantRegistry::new();
    let mut grid = OccupancyGrid::new(plan.width, plan.height);
    for &(x, y, helper) in people {
        let cell = Cell::new(x, y);
        let occupant = if helper {
            Occupant::helper(cell, config.helper_speed, 1.0)
        } else {
            Occupant::dependent(cell)
        };
        let id = registry.add(occupant);
        grid.place(cell, id).unwrap();
    }
    SimBuilder::new(config, plan).population(registry, grid).build().unwrap()
}

#[derive(Default)]
struct Recorder {
    ticks:       Vec<Tick>,
    evacuations: Vec<Evacuation>,
    pairs:       Vec<Award>,
    merges:      Vec<(GroupId, GroupId, GroupId)>,
    ended:       Option<RunRecord>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.ticks.push(tick);
    }
    fn on_evacuated(&mut self, evacuation: &Evacuation) {
        self.evacuations.push(*evacuation);
    }
    fn on_pair_formed(&mut self, _tick: Tick, award: &Award) {
        self.pairs.push(*award);
    }
    fn on_merge(&mut self, _tick: Tick, a: GroupId, b: GroupId, merged: GroupId) {
        self.merges.push((a, b, merged));
    }
    fn on_sim_end(&mut self, record: &RunRecord) {
        self.ended = Some(record.clone());
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use std::sync::Arc;

    use ev_spatial::SpatialGraph;

    use super::*;
    use crate::{Phase, SimError};

    #[test]
    fn builds_with_random_population() {
        let cfg = EvacConfig { occupant_count: 12, helper_ratio: 0.75, ..Default::default() };
        let sim = SimBuilder::new(cfg, plan(SINGLE_EXIT)).build().unwrap();
        assert_eq!(sim.registry().len(), 12);
        assert_eq!(sim.registry().iter().filter(|o| !o.is_helper()).count(), 3);
        assert_eq!(sim.grid().occupied(), 12);
        assert_eq!(sim.phase(), Phase::Setup);
        assert_eq!(sim.tick(), Tick::ZERO);
    }

    #[test]
    fn debug_shows_progress_not_internals() {
        let sim = hand_sim(CORRIDOR, &[(2, 1, true), (5, 1, false)], EvacConfig::default());
        let text = format!("{sim:?}");
        assert!(text.starts_with("Sim {"), "got {text}");
        assert!(text.contains("remaining: 2"), "got {text}");
        assert!(text.contains("phase: Setup"), "got {text}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EvacConfig { helper_ratio: 2.0, ..Default::default() };
        let err = SimBuilder::new(cfg, plan(SINGLE_EXIT)).build().unwrap_err();
        assert!(matches!(err, SimError::Core(_)), "got {err}");
    }

    #[test]
    fn overfull_plan_is_rejected() {
        let cfg = EvacConfig { occupant_count: 100, ..Default::default() };
        let err = SimBuilder::new(cfg, plan(SINGLE_EXIT)).build().unwrap_err();
        assert!(matches!(err, SimError::Agent(_)), "got {err}");
    }

    #[test]
    fn plan_without_exit_is_rejected() {
        let err = SimBuilder::new(EvacConfig::default(), plan("WWW\nW.W\nWWW\n"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Spatial(_)), "got {err}");
    }

    #[test]
    fn mismatched_graph_is_rejected() {
        let other = Arc::new(SpatialGraph::from_plan(&plan(CORRIDOR)).unwrap());
        let err = SimBuilder::new(EvacConfig::default(), plan(SINGLE_EXIT))
            .graph(other)
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)), "got {err}");
    }

    #[test]
    fn hand_population_must_stand_on_floor() {
        let p = plan(CORRIDOR);
        let mut registry = OccupantRegistry::new();
        let mut grid = OccupancyGrid::new(p.width, p.height);
        let id = registry.add(Occupant::dependent(Cell::new(0, 0))); // a wall
        grid.place(Cell::new(0, 0), id).unwrap();
        let err = SimBuilder::new(EvacConfig::default(), p)
            .population(registry, grid)
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)), "got {err}");
    }
}

// ── Termination scenarios ─────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use ev_core::VotingMethod;

    use super::*;
    use crate::{NoopObserver, Phase, Termination};

    #[test]
    fn single_exit_evacuates_everyone_for_every_method() {
        let p = plan(SINGLE_EXIT);
        let area = p.area() as u64;
        for method in VotingMethod::ALL {
            let cfg = EvacConfig {
                occupant_count: 10,
                helper_ratio: 1.0,
                voting_method: method,
                ..Default::default()
            };
            let mut sim = SimBuilder::new(cfg, p.clone()).build().unwrap();
            let record = sim.run(&mut NoopObserver).unwrap();

            assert_eq!(record.termination, Termination::AllEvacuated, "{method}");
            assert!(record.total_ticks <= area * 2, "{method}: {} ticks", record.total_ticks);
            assert_eq!(record.evacuated(), 10);
            assert_eq!(record.left_behind, 0);
            assert!(record.evacuations.iter().all(|e| e.exit == Cell::new(9, 1)));
            assert_eq!(sim.phase(), Phase::Terminated);
        }
    }

    #[test]
    fn lone_dependent_stalls_after_one_tick() {
        let cfg = EvacConfig { occupant_count: 1, helper_ratio: 0.0, ..Default::default() };
        let mut sim = SimBuilder::new(cfg, plan(CORRIDOR)).build().unwrap();
        let record = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(record.termination, Termination::Stalled);
        assert_eq!(record.total_ticks, 1);
        assert_eq!(record.left_behind, 1);
        assert_eq!(record.avg_evac_time(), None);
    }

    #[test]
    fn empty_building_needs_no_ticks() {
        let cfg = EvacConfig { occupant_count: 0, ..Default::default() };
        let mut sim = SimBuilder::new(cfg, plan(CORRIDOR)).build().unwrap();
        let record = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(record.termination, Termination::AllEvacuated);
        assert_eq!(record.total_ticks, 0);
    }

    #[test]
    fn step_budget_cuts_the_run_short() {
        let cfg = EvacConfig { step_budget: 1, ..Default::default() };
        let mut sim = hand_sim(CORRIDOR, &[(8, 1, true)], cfg);
        let record = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(record.termination, Termination::StepBudget);
        assert_eq!(record.total_ticks, 1);
        assert_eq!(record.left_behind, 1);
        // speed 2: one tick took the helper from x=8 to x=6
        assert_eq!(sim.registry().iter().next().unwrap().cell, Cell::new(6, 1));
    }

    #[test]
    fn helper_escorts_a_dependent_out() {
        let cfg = EvacConfig { paired_speed: 1, ..Default::default() };
        let mut sim = hand_sim(CORRIDOR, &[(6, 1, true), (4, 1, false)], cfg);
        let mut rec = Recorder::default();
        let record = sim.run(&mut rec).unwrap();

        assert_eq!(rec.pairs.len(), 1);
        assert_eq!(rec.pairs[0].dependent, OccupantId(1));
        assert_eq!(rec.pairs[0].helper, OccupantId(0));
        assert_eq!(record.termination, Termination::AllEvacuated);
        // dependent: 4 cells at speed 1 → steps onto the exit during tick 3
        // helper:    6 cells at speed 1 → tick 5
        let by_id: Vec<(OccupantId, u64)> =
            record.evacuations.iter().map(|e| (e.occupant, e.tick.0)).collect();
        assert_eq!(by_id, vec![(OccupantId(1), 3), (OccupantId(0), 5)]);
        assert_eq!(record.total_ticks, 6);
        assert_eq!(record.avg_evac_time(), Some(4.0));
        assert_eq!(rec.ended, Some(record));
        assert_eq!(rec.ticks.len(), 6);
    }

    #[test]
    fn same_seed_same_record() {
        let cfg = EvacConfig { occupant_count: 20, helper_ratio: 0.8, seed: 99, ..Default::default() };
        let a = SimBuilder::new(cfg.clone(), plan(OFFICE)).build().unwrap().run(&mut NoopObserver).unwrap();
        let b = SimBuilder::new(cfg, plan(OFFICE)).build().unwrap().run(&mut NoopObserver).unwrap();
        assert_eq!(a, b);
    }
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collisions {
    use ev_core::VotingMethod;
    use ev_group::GroupKind;

    use super::*;
    use crate::{NoopObserver, Termination};

    const LEFT: Cell = Cell::new(0, 1);
    const RIGHT: Cell = Cell::new(8, 1);

    /// Put each listed occupant in its own corridor group with `target`.
    fn group_each(sim: &mut Sim, targets: &[(OccupantId, Cell)]) -> Vec<GroupId> {
        targets
            .iter()
            .map(|&(id, target)| {
                let g = sim.arena.alloc(GroupKind::Corridor);
                sim.arena.assign(&mut sim.registry, id, g).unwrap();
                sim.arena.set_target(&mut sim.registry, g, target).unwrap();
                g
            })
            .collect()
    }

    #[test]
    fn different_targets_merge_and_revote() {
        let cfg = EvacConfig { voting_method: VotingMethod::Approval, ..Default::default() };
        let mut sim = hand_sim(TWO_ENDS, &[(3, 1, true), (4, 1, true)], cfg);
        let (a, b) = (OccupantId(0), OccupantId(1));
        let groups = group_each(&mut sim, &[(a, RIGHT), (b, LEFT)]);

        let mut rec = Recorder::default();
        sim.step_occupant(a, Tick::ZERO, &mut rec).unwrap();

        assert_eq!(rec.merges.len(), 1);
        let (ga, gb, merged) = rec.merges[0];
        assert_eq!((ga, gb), (groups[0], groups[1]));

        let group = sim.arena().get(merged).unwrap();
        assert_eq!(group.kind, GroupKind::Merged);
        assert_eq!(group.members(), &[a, b]);
        assert_eq!(sim.arena().len(), 1);
        // (3,1) approves only LEFT (3 vs 5); (4,1) approves both (4 vs 4).
        assert_eq!(group.target, Some(LEFT));
        for id in [a, b] {
            assert_eq!(sim.registry().get(id).unwrap().target_exit, Some(LEFT));
            assert_eq!(sim.registry().get(id).unwrap().group, Some(merged));
        }
        // the collision ended the mover's turn
        assert_eq!(sim.registry().get(a).unwrap().cell, Cell::new(3, 1));
    }

    #[test]
    fn same_target_waits() {
        let mut sim = hand_sim(TWO_ENDS, &[(4, 1, true), (3, 1, true)], EvacConfig::default());
        let (a, b) = (OccupantId(0), OccupantId(1));
        group_each(&mut sim, &[(a, LEFT), (b, LEFT)]);

        let mut rec = Recorder::default();
        sim.step_occupant(a, Tick::ZERO, &mut rec).unwrap();
        assert!(rec.merges.is_empty());
        assert_eq!(sim.arena().len(), 2);
        assert_eq!(sim.registry().get(a).unwrap().cell, Cell::new(4, 1));
    }

    /// Bind `dependent` and `helper` the way a negotiation award does.
    fn pair_up(sim: &mut Sim, dependent: OccupantId, helper: OccupantId, exit: Cell) -> GroupId {
        let g = sim.arena.form_pair(&mut sim.registry, dependent, helper, exit).unwrap();
        for (me, partner) in [(dependent, helper), (helper, dependent)] {
            let o = sim.registry.get_mut(me).unwrap();
            o.partner = Some(partner);
            o.speed = sim.config.paired_speed;
            o.target_exit = Some(exit);
        }
        g
    }

    #[test]
    fn two_member_groups_merge_and_share_one_exit() {
        let cfg = EvacConfig { voting_method: VotingMethod::Approval, ..Default::default() };
        let mut sim = hand_sim(
            TWO_ENDS,
            &[(3, 1, true), (2, 1, true), (4, 1, true), (5, 1, true)],
            cfg,
        );
        let [a, a2, b, b2] = [0, 1, 2, 3].map(OccupantId);
        for (members, target) in [([a, a2], RIGHT), ([b, b2], LEFT)] {
            let g = sim.arena.alloc(GroupKind::Corridor);
            for m in members {
                sim.arena.assign(&mut sim.registry, m, g).unwrap();
            }
            sim.arena.set_target(&mut sim.registry, g, target).unwrap();
        }
        assert_eq!(sim.arena().len(), 2);

        let mut rec = Recorder::default();
        sim.step_occupant(a, Tick::ZERO, &mut rec).unwrap();

        assert_eq!(rec.merges.len(), 1);
        let merged = rec.merges[0].2;
        assert_eq!(sim.arena().len(), 1);
        let group = sim.arena().get(merged).unwrap();
        assert_eq!(group.len(), 4);
        // Approvals: x=2 and x=3 approve LEFT only, x=4 approves both,
        // x=5 approves RIGHT only.  LEFT wins 3 to 2.
        assert_eq!(group.target, Some(LEFT));
        for id in [a, a2, b, b2] {
            let o = sim.registry().get(id).unwrap();
            assert_eq!(o.group, Some(merged), "{id}");
            assert_eq!(o.target_exit, Some(LEFT), "{id}");
        }
    }

    #[test]
    fn group_blocked_by_a_pair_follows_it() {
        let mut sim =
            hand_sim(TWO_ENDS, &[(3, 1, true), (4, 1, true), (5, 1, false)], EvacConfig::default());
        let (a, helper, dependent) = (OccupantId(0), OccupantId(1), OccupantId(2));
        let groups = group_each(&mut sim, &[(a, RIGHT)]);
        let pair = pair_up(&mut sim, dependent, helper, LEFT);

        let mut rec = Recorder::default();
        sim.step_occupant(a, Tick::ZERO, &mut rec).unwrap();
        assert!(rec.merges.is_empty());
        assert_eq!(sim.arena().len(), 2);
        assert_eq!(sim.arena().get(groups[0]).unwrap().target, Some(LEFT));
        assert_eq!(sim.registry().get(a).unwrap().target_exit, Some(LEFT));
        // the pair keeps its members and its exit
        assert_eq!(sim.arena().get(pair).unwrap().members(), &[dependent, helper]);
        assert_eq!(sim.registry().get(dependent).unwrap().target_exit, Some(LEFT));
    }

    #[test]
    fn pair_moving_into_a_group_turns_the_group() {
        let mut sim =
            hand_sim(TWO_ENDS, &[(3, 1, true), (4, 1, true), (5, 1, false)], EvacConfig::default());
        let (a, helper, dependent) = (OccupantId(0), OccupantId(1), OccupantId(2));
        group_each(&mut sim, &[(a, RIGHT)]);
        pair_up(&mut sim, dependent, helper, LEFT);

        let mut rec = Recorder::default();
        sim.step_occupant(helper, Tick::ZERO, &mut rec).unwrap();
        assert!(rec.merges.is_empty());
        assert_eq!(sim.registry().get(a).unwrap().target_exit, Some(LEFT));
        assert_eq!(sim.registry().get(helper).unwrap().cell, Cell::new(4, 1));
    }

    #[test]
    fn pair_and_group_in_a_single_file_corridor_both_get_out() {
        let cfg = EvacConfig { paired_speed: 1, step_budget: 200, ..Default::default() };
        let mut sim = hand_sim(
            "WWWWWWWWWWW\nE.........E\nWWWWWWWWWWW\n",
            &[(2, 1, true), (3, 1, false), (4, 1, true)],
            cfg,
        );
        let (a, dependent, helper) = (OccupantId(0), OccupantId(1), OccupantId(2));
        group_each(&mut sim, &[(a, Cell::new(10, 1))]);
        pair_up(&mut sim, dependent, helper, LEFT);

        let record = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(record.termination, Termination::AllEvacuated);
        assert_eq!(record.evacuated(), 3);
        assert!(record.evacuations.iter().all(|e| e.exit == LEFT));
        assert!(record.total_ticks < 20, "{} ticks", record.total_ticks);
    }

    #[test]
    fn stepping_onto_an_exit_evacuates() {
        let mut sim = hand_sim(TWO_ENDS, &[(1, 1, true)], EvacConfig::default());
        let a = OccupantId(0);
        group_each(&mut sim, &[(a, LEFT)]);

        let mut rec = Recorder::default();
        sim.step_occupant(a, Tick(7), &mut rec).unwrap();
        assert_eq!(rec.evacuations, vec![Evacuation { occupant: a, exit: LEFT, tick: Tick(7) }]);
        assert!(sim.registry().is_empty());
        assert!(sim.grid().is_free(Cell::new(1, 1)));
        assert!(sim.arena().is_empty());
    }
}

// ── Invariants over whole runs ────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use ev_core::VotingMethod;

    use super::*;
    use crate::NoopObserver;

    fn check_occupancy(sim: &Sim) {
        assert_eq!(sim.grid().occupied(), sim.registry().len());
        let mut cells = HashSet::new();
        for o in sim.registry().iter() {
            assert!(cells.insert(o.cell), "two occupants on {}", o.cell);
            assert_eq!(sim.grid().occupant_at(o.cell), Some(o.id));
            assert!(!sim.graph().is_exit(o.cell));
        }
    }

    fn check_groups(sim: &Sim) {
        let mut seen = HashSet::new();
        for g in sim.arena().iter() {
            assert!(!g.is_empty(), "{} is empty but still allocated", g.id);
            for &m in g.members() {
                assert!(seen.insert(m), "{m} is in two groups");
                assert_eq!(sim.registry().get(m).unwrap().group, Some(g.id));
            }
            if g.is_pair() {
                assert!(g.len() <= 2);
            }
        }
        for o in sim.registry().iter() {
            if let Some(p) = o.partner {
                // a partner is either still here and points back, or already out
                if let Some(q) = sim.registry().get(p) {
                    assert_eq!(q.partner, Some(o.id));
                }
            }
        }
    }

    #[test]
    fn occupancy_population_and_groups_stay_consistent() {
        for method in VotingMethod::ALL {
            let cfg = EvacConfig {
                occupant_count: 20,
                helper_ratio: 0.8,
                voting_method: method,
                step_budget: 300,
                seed: 5,
                ..Default::default()
            };
            let mut sim = SimBuilder::new(cfg, plan(OFFICE)).build().unwrap();
            let mut gone: HashSet<OccupantId> = HashSet::new();
            let mut population = sim.registry().len();

            while sim.run_ticks(1, &mut NoopObserver).unwrap().is_none() {
                check_occupancy(&sim);
                check_groups(&sim);

                assert!(sim.registry().len() <= population);
                population = sim.registry().len();
                for e in sim.evacuations() {
                    gone.insert(e.occupant);
                }
                for id in &gone {
                    assert!(!sim.registry().contains(*id), "{id} came back");
                }
            }
            let record = sim.record().unwrap();
            assert_eq!(record.evacuated() + record.left_behind, 20);
        }
    }
}

// ── Batch and rendering ───────────────────────────────────────────────────────

#[cfg(test)]
mod batch_and_render {
    use super::*;
    use crate::{render_ascii, run_batch, NoopObserver};

    #[test]
    fn batch_runs_are_individually_reproducible() {
        let cfg = EvacConfig { occupant_count: 8, batch_count: 3, ..Default::default() };
        let p = plan(OFFICE);
        let records = run_batch(&cfg, &p).unwrap();
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.run_index, i);
            assert_eq!(record.seed, cfg.seed);
            let solo = SimBuilder::new(cfg.clone(), p.clone())
                .run_index(i)
                .build()
                .unwrap()
                .run(&mut NoopObserver)
                .unwrap();
            assert_eq!(&solo, record);
        }
    }

    #[test]
    fn render_marks_walls_exits_and_people() {
        let sim = hand_sim(CORRIDOR, &[(2, 1, true), (5, 1, false)], EvacConfig::default());
        let expected = "WWWWWWWWWW\nE H  D   W\nWWWWWWWWWW\n";
        assert_eq!(render_ascii(&sim), expected);
    }
}

//! Unit tests for ev-negotiate.

#[cfg(test)]
mod helpers {
    use ev_spatial::{FloorPlan, SpatialGraph};

    /// A straight corridor with a single exit at (0,1).
    pub const CORRIDOR: &str = "\
WWWWWWWWWW
E........W
WWWWWWWWWW
";

    pub fn graph() -> SpatialGraph {
        SpatialGraph::from_plan(&FloorPlan::parse(CORRIDOR).unwrap()).unwrap()
    }
}

#[cfg(test)]
mod willingness {
    use crate::is_willing;

    #[test]
    fn fully_willing_always_accepts() {
        assert!(is_willing(1.0, 6, 40, 0));
    }

    #[test]
    fn unwilling_helper_declines_a_detour() {
        // (1 − 0) × (1 + 5) = 6 > 3.5
        assert!(!is_willing(0.0, 2, 5, 7));
        // (1 − 0.5) × 6 = 3 ≤ 3.5
        assert!(is_willing(0.5, 2, 5, 7));
    }

    #[test]
    fn boundary_is_inclusive() {
        // (1 − 0.5) × (1 + 3) = 2 = 4 / 2
        assert!(is_willing(0.5, 2, 3, 4));
        assert!(!is_willing(0.5, 2, 3, 3));
    }
}

#[cfg(test)]
mod contract {
    use ev_agent::{Occupant, OccupantRegistry};
    use ev_core::{Cell, OccupantId};

    use super::helpers::graph;
    use crate::{call_for_proposals, Award};

    const EXIT: Cell = Cell::new(0, 1);

    #[test]
    fn lowest_bid_wins() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        let far = reg.add(Occupant::helper(Cell::new(8, 1), 2, 1.0));
        let near = reg.add(Occupant::helper(Cell::new(7, 1), 2, 1.0));
        let dep = reg.add(Occupant::dependent(Cell::new(5, 1)));

        let award = call_for_proposals(&reg, &g, dep, EXIT, 6).unwrap();
        assert_eq!(award, Award { dependent: dep, helper: near, exit: EXIT, bid: 2 });
        assert_ne!(award.helper, far);
    }

    #[test]
    fn equal_bids_go_to_the_lowest_id() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        let first = reg.add(Occupant::helper(Cell::new(7, 1), 2, 1.0));
        reg.add(Occupant::helper(Cell::new(3, 1), 2, 1.0));
        let dep = reg.add(Occupant::dependent(Cell::new(5, 1)));

        let award = call_for_proposals(&reg, &g, dep, EXIT, 6).unwrap();
        assert_eq!(award.helper, first);
        assert_eq!(award.helper, OccupantId(0));
    }

    #[test]
    fn helpers_beyond_the_call_radius_are_not_asked() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        reg.add(Occupant::helper(Cell::new(8, 1), 2, 1.0));
        let dep = reg.add(Occupant::dependent(Cell::new(5, 1)));
        assert_eq!(call_for_proposals(&reg, &g, dep, EXIT, 2), None);
        assert!(call_for_proposals(&reg, &g, dep, EXIT, 3).is_some());
    }

    #[test]
    fn unwilling_helpers_do_not_bid() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        reg.add(Occupant::helper(Cell::new(7, 1), 2, 0.0));
        let dep = reg.add(Occupant::dependent(Cell::new(5, 1)));
        assert_eq!(call_for_proposals(&reg, &g, dep, EXIT, 6), None);
    }

    #[test]
    fn dependents_and_paired_helpers_are_not_candidates() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        let busy = reg.add(Occupant::helper(Cell::new(6, 1), 2, 1.0));
        reg.get_mut(busy).unwrap().partner = Some(OccupantId(99));
        reg.add(Occupant::dependent(Cell::new(4, 1)));
        let dep = reg.add(Occupant::dependent(Cell::new(5, 1)));
        assert_eq!(call_for_proposals(&reg, &g, dep, EXIT, 6), None);
    }
}

#[cfg(test)]
mod round {
    use ev_agent::{Occupant, OccupantRegistry};
    use ev_core::{Cell, SimRng};
    use ev_group::{GroupArena, GroupKind};

    use super::helpers::graph;
    use crate::{negotiate, NegotiationParams};

    #[test]
    fn award_binds_a_permanent_pair() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        let mut arena = GroupArena::new();
        let helper = reg.add(Occupant::helper(Cell::new(7, 1), 2, 1.0));
        let dep = reg.add(Occupant::dependent(Cell::new(5, 1)));
        let corridor = arena.alloc(GroupKind::Corridor);
        arena.assign(&mut reg, helper, corridor).unwrap();

        let params = NegotiationParams { paired_speed: 1, ..Default::default() };
        let mut rng = SimRng::new(0);
        let awards = negotiate(&mut arena, &mut reg, &g, &params, &mut rng).unwrap();
        assert_eq!(awards.len(), 1);

        let (h, d) = (reg.get(helper).unwrap(), reg.get(dep).unwrap());
        assert_eq!(h.partner, Some(dep));
        assert_eq!(d.partner, Some(helper));
        assert_eq!((h.speed, d.speed), (1, 1));
        assert_eq!(h.target_exit, Some(Cell::new(0, 1)));
        assert_eq!(d.target_exit, Some(Cell::new(0, 1)));
        assert_eq!(h.group, d.group);

        let pair = arena.get(h.group.unwrap()).unwrap();
        assert!(pair.is_pair());
        assert_eq!(pair.len(), 2);
        // the helper's corridor group lost its only member
        assert!(arena.get(corridor).is_none());

        // nobody left to negotiate for
        assert!(negotiate(&mut arena, &mut reg, &g, &params, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn a_helper_is_awarded_at_most_once() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        let mut arena = GroupArena::new();
        let first = reg.add(Occupant::dependent(Cell::new(4, 1)));
        let second = reg.add(Occupant::dependent(Cell::new(5, 1)));
        reg.add(Occupant::helper(Cell::new(6, 1), 2, 1.0));

        let awards =
            negotiate(&mut arena, &mut reg, &g, &NegotiationParams::default(), &mut SimRng::new(1))
                .unwrap();
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].dependent, first);
        assert!(reg.get(second).unwrap().is_stranded());
        // the stranded dependent still picked an exit
        assert_eq!(reg.get(second).unwrap().target_exit, Some(Cell::new(0, 1)));
    }

    #[test]
    fn no_helpers_is_a_steady_state() {
        let g = graph();
        let mut reg = OccupantRegistry::new();
        let mut arena = GroupArena::new();
        reg.add(Occupant::dependent(Cell::new(5, 1)));
        let awards =
            negotiate(&mut arena, &mut reg, &g, &NegotiationParams::default(), &mut SimRng::new(2))
                .unwrap();
        assert!(awards.is_empty());
        assert!(arena.is_empty());
        assert!(reg.is_stalled());
    }
}

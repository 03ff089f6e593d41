//! The `Occupant` record.

use ev_core::{Cell, GroupId, OccupantId, OccupantKind};

/// One simulated person.
///
/// Mutated every tick by movement, group assignment and target-exit
/// assignment; dropped from the registry the moment it reaches an exit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    /// Assigned by [`OccupantRegistry::add`][crate::OccupantRegistry::add].
    pub id: OccupantId,

    pub kind: OccupantKind,

    /// Current position.  Always a walkable, non-exit cell while registered.
    pub cell: Cell,

    /// Cells traversable per tick.  0 means immobile.
    pub speed: u32,

    /// Group this occupant votes with; `None` until clustered or paired.
    pub group: Option<GroupId>,

    /// Exit the occupant is walking toward; `None` until decided.
    pub target_exit: Option<Cell>,

    /// Willingness to assist, in [0, 1].  `None` for dependents.
    pub willingness: Option<f64>,

    /// The other member of this occupant's pair, once negotiated.
    pub partner: Option<OccupantId>,
}

impl Occupant {
    /// A helper-capable occupant at `cell`.
    pub fn helper(cell: Cell, speed: u32, willingness: f64) -> Self {
        Self {
            id:          OccupantId::INVALID,
            kind:        OccupantKind::Helper,
            cell,
            speed,
            group:       None,
            target_exit: None,
            willingness: Some(willingness.clamp(0.0, 1.0)),
            partner:     None,
        }
    }

    /// A dependent occupant at `cell`; immobile until paired.
    pub fn dependent(cell: Cell) -> Self {
        Self {
            id:          OccupantId::INVALID,
            kind:        OccupantKind::Dependent,
            cell,
            speed:       0,
            group:       None,
            target_exit: None,
            willingness: None,
            partner:     None,
        }
    }

    #[inline]
    pub fn is_helper(&self) -> bool {
        self.kind.is_helper()
    }

    #[inline]
    pub fn is_paired(&self) -> bool {
        self.partner.is_some()
    }

    /// A dependent nobody has agreed to help yet.
    #[inline]
    pub fn is_stranded(&self) -> bool {
        !self.is_helper() && self.speed == 0 && self.partner.is_none()
    }

    /// Helper-capable, not in any group, not paired: eligible for clustering.
    #[inline]
    pub fn is_clusterable(&self) -> bool {
        self.is_helper() && self.group.is_none() && self.partner.is_none()
    }
}

//! `OccupantRegistry` — live occupant set and randomized activation.
//!
//! # Storage
//!
//! Occupants live in `slots`, indexed by `OccupantId`.  A removed occupant's
//! slot becomes `None` and is never reused, so ids are stable for the whole
//! run and a removed id can never reappear.  `live` keeps the ids of present
//! occupants in ascending order; that is the "registry order" used wherever a
//! phase must visit occupants deterministically (clustering, negotiation).
//!
//! # Activation
//!
//! [`activation_order`](OccupantRegistry::activation_order) shuffles the live
//! set with the run's `SimRng` once per tick.  The shuffled order is the only
//! source of nondeterminism in movement, and it is reproducible from the seed.

use ev_core::{OccupantId, SimRng};

use crate::Occupant;

#[derive(Default, Debug)]
pub struct OccupantRegistry {
    slots: Vec<Option<Occupant>>,
    live:  Vec<OccupantId>,
}

impl OccupantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `occupant`, assigning and returning its id.
    pub fn add(&mut self, mut occupant: Occupant) -> OccupantId {
        let id = OccupantId(self.slots.len() as u32);
        occupant.id = id;
        self.slots.push(Some(occupant));
        self.live.push(id);
        id
    }

    /// Remove and return `id`.  `None` if it was never added or already gone.
    pub fn remove(&mut self, id: OccupantId) -> Option<Occupant> {
        let occupant = self.slots.get_mut(id.index())?.take()?;
        if let Ok(pos) = self.live.binary_search(&id) {
            self.live.remove(pos);
        }
        Some(occupant)
    }

    #[inline]
    pub fn get(&self, id: OccupantId) -> Option<&Occupant> {
        self.slots.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: OccupantId) -> Option<&mut Occupant> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn contains(&self, id: OccupantId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupants still present.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of occupants ever added, present or not.
    pub fn spawned(&self) -> usize {
        self.slots.len()
    }

    /// `true` iff occupants remain and every one of them is a dependent that is
    /// immobile and unpaired: no further progress is possible.
    pub fn is_stalled(&self) -> bool {
        !self.is_empty() && self.iter().all(Occupant::is_stranded)
    }

    /// Ids of present occupants in ascending (registry) order.
    pub fn ids(&self) -> &[OccupantId] {
        &self.live
    }

    /// Present occupants in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Occupant> {
        self.live.iter().filter_map(|&id| self.get(id))
    }

    /// This tick's activation order: the live set, shuffled.
    pub fn activation_order(&self, rng: &mut SimRng) -> Vec<OccupantId> {
        let mut order = self.live.clone();
        rng.shuffle(&mut order);
        order
    }
}

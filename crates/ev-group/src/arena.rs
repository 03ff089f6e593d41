//! `GroupArena` — integer-indexed group storage.
//!
//! # Slot lifecycle
//!
//! Groups live in `slots[GroupId]`.  A freed slot is pushed on `free` and the
//! next [`alloc`](GroupArena::alloc) pops it, so ids are reused across the run
//! (unlike occupant ids).  A group is freed the moment its last member
//! leaves, and both source groups are freed by a merge.
//!
//! Room groups are also indexed by label so the room pass can find "the group
//! for room `a`" in O(1).  Freeing a room group drops its label entry, and the
//! next occupant seen in that room starts a fresh group.

use rustc_hash::FxHashMap;

use ev_agent::OccupantRegistry;
use ev_core::{Cell, EvError, EvResult, GroupId, OccupantId};

/// How a group came to exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupKind {
    /// Everyone clustered in the room with this label.
    Room(char),
    /// Grown from a seed occupant in a corridor.
    Corridor,
    /// The union of two groups whose members collided.
    Merged,
    /// One dependent and the helper escorting it.  Never votes.
    Pair,
}

#[derive(Clone, Debug)]
pub struct Group {
    pub id:     GroupId,
    pub kind:   GroupKind,
    members:    Vec<OccupantId>,
    /// Exit chosen by the group's vote; `None` until voted.
    pub target: Option<Cell>,
}

impl Group {
    /// Members in join order.
    pub fn members(&self) -> &[OccupantId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: OccupantId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_pair(&self) -> bool {
        self.kind == GroupKind::Pair
    }
}

#[derive(Default, Debug)]
pub struct GroupArena {
    slots: Vec<Option<Group>>,
    free:  Vec<GroupId>,
    rooms: FxHashMap<char, GroupId>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty group of `kind`, reusing a freed slot when available.
    pub fn alloc(&mut self, kind: GroupKind) -> GroupId {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                self.slots.push(None);
                GroupId(self.slots.len() as u32 - 1)
            }
        };
        self.slots[id.index()] = Some(Group { id, kind, members: Vec::new(), target: None });
        if let GroupKind::Room(label) = kind {
            self.rooms.insert(label, id);
        }
        id
    }

    #[inline]
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.slots.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Number of live groups.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live groups in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.slots.iter().flatten()
    }

    /// The live group for room `label`, if one exists.
    pub fn room_group(&self, label: char) -> Option<GroupId> {
        self.rooms.get(&label).copied()
    }

    /// Non-pair groups that have not voted yet, in id order.
    pub fn unvoted(&self) -> Vec<GroupId> {
        self.iter()
            .filter(|g| !g.is_pair() && g.target.is_none())
            .map(|g| g.id)
            .collect()
    }

    /// Put `occupant` into `group`, leaving its previous group first.
    ///
    /// A member joining a group that has already voted adopts the group's
    /// target exit.
    pub fn assign(
        &mut self,
        registry: &mut OccupantRegistry,
        occupant: OccupantId,
        group: GroupId,
    ) -> EvResult<()> {
        let target = self.get(group).ok_or(EvError::GroupNotFound(group))?.target;
        let previous = registry
            .get(occupant)
            .ok_or(EvError::OccupantNotFound(occupant))?
            .group;
        if previous == Some(group) {
            return Ok(());
        }
        if let Some(prev) = previous {
            self.detach(prev, occupant);
        }

        if let Some(g) = self.get_mut(group) {
            g.members.push(occupant);
        }
        if let Some(o) = registry.get_mut(occupant) {
            o.group = Some(group);
            if target.is_some() {
                o.target_exit = target;
            }
        }
        Ok(())
    }

    /// Take `occupant` out of whatever group it is in.  A group left empty is
    /// freed.  Also used when an occupant evacuates.
    pub fn remove_member(&mut self, registry: &mut OccupantRegistry, occupant: OccupantId) {
        let Some(o) = registry.get_mut(occupant) else {
            return;
        };
        if let Some(group) = o.group.take() {
            self.detach(group, occupant);
        }
    }

    /// Drop `occupant` from `group` without touching the occupant record.
    /// Frees the group if it became empty.
    pub fn detach(&mut self, group: GroupId, occupant: OccupantId) {
        let Some(g) = self.get_mut(group) else {
            return;
        };
        g.members.retain(|&m| m != occupant);
        if g.members.is_empty() {
            self.free_slot(group);
        }
    }

    /// Merge `a` and `b` into a new `Merged` group and return its id.
    ///
    /// Members of `a` come first, then members of `b`.  Both source slots are
    /// freed and the merged group starts without a target: the caller must
    /// revote it.
    pub fn merge(
        &mut self,
        registry: &mut OccupantRegistry,
        a: GroupId,
        b: GroupId,
    ) -> EvResult<GroupId> {
        if a == b {
            return Ok(a);
        }
        let ga = self.take(a)?;
        let gb = match self.take(b) {
            Ok(g) => g,
            Err(e) => {
                // Put `a` back so a failed merge changes nothing.
                self.restore(ga);
                return Err(e);
            }
        };

        let merged = self.alloc(GroupKind::Merged);
        let members: Vec<OccupantId> = ga.members.into_iter().chain(gb.members).collect();
        for &m in &members {
            if let Some(o) = registry.get_mut(m) {
                o.group = Some(merged);
            }
        }
        if let Some(g) = self.get_mut(merged) {
            g.members = members;
        }
        log::debug!("merged {a} and {b} into {merged}");
        Ok(merged)
    }

    /// Create a `Pair` group holding `dependent` and `helper`, both pointed at
    /// `exit`.  Each leaves any group it was in.
    ///
    /// Only group membership and the group target are set here; the caller
    /// updates the occupants' partner, speed and target fields.
    pub fn form_pair(
        &mut self,
        registry: &mut OccupantRegistry,
        dependent: OccupantId,
        helper: OccupantId,
        exit: Cell,
    ) -> EvResult<GroupId> {
        for id in [dependent, helper] {
            if !registry.contains(id) {
                return Err(EvError::OccupantNotFound(id));
            }
        }
        let pair = self.alloc(GroupKind::Pair);
        if let Some(g) = self.get_mut(pair) {
            g.target = Some(exit);
        }
        self.assign(registry, dependent, pair)?;
        self.assign(registry, helper, pair)?;
        Ok(pair)
    }

    /// Record `exit` as the group's decision and copy it to every member.
    pub fn set_target(
        &mut self,
        registry: &mut OccupantRegistry,
        group: GroupId,
        exit: Cell,
    ) -> EvResult<()> {
        let g = self.get_mut(group).ok_or(EvError::GroupNotFound(group))?;
        g.target = Some(exit);
        for &m in &g.members {
            if let Some(o) = registry.get_mut(m) {
                o.target_exit = Some(exit);
            }
        }
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn take(&mut self, id: GroupId) -> EvResult<Group> {
        let group = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(EvError::GroupNotFound(id))?;
        self.forget_room(&group);
        self.free.push(id);
        Ok(group)
    }

    fn restore(&mut self, group: Group) {
        let id = group.id;
        self.free.retain(|&f| f != id);
        if let GroupKind::Room(label) = group.kind {
            self.rooms.insert(label, id);
        }
        self.slots[id.index()] = Some(group);
    }

    fn free_slot(&mut self, id: GroupId) {
        if let Some(group) = self.slots.get_mut(id.index()).and_then(Option::take) {
            self.forget_room(&group);
            self.free.push(id);
        }
    }

    fn forget_room(&mut self, group: &Group) {
        if let GroupKind::Room(label) = group.kind {
            if self.rooms.get(&label) == Some(&group.id) {
                self.rooms.remove(&label);
            }
        }
    }
}

//! Target and attacker back-references.
//!
//! Both are stored as entity ids and resolved through an
//! [`EntityLookup`] at the point of use. An id that no longer resolves is
//! treated exactly like "no target" / "no attacker".

use super::{Character, MotionFlags};
use crate::animation::AnimationState;
use crate::env::{EntityLookup, Pathfinder};
use crate::state::{EntityId, EntityView, GridCell, Orientation};

impl Character {
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    pub fn remove_target(&mut self) {
        self.target = None;
    }

    /// Resolves the target against the live world; stale ids yield `None`.
    pub fn live_target<L>(&self, lookup: &L) -> Option<EntityView>
    where
        L: EntityLookup + ?Sized,
    {
        self.target.and_then(|id| lookup.entity(id))
    }

    /// Starts attacking `entity`: marks the character as attacking and
    /// follows it into range.
    pub fn attack(&mut self, entity: &EntityView, pathfinder: &dyn Pathfinder) {
        self.flags.insert(MotionFlags::ATTACKING);
        self.follow(entity, pathfinder);
    }

    /// Gives up on the current target.
    pub fn back_off(&mut self) {
        self.flags
            .remove(MotionFlags::ATTACKING | MotionFlags::FOLLOWING);
        self.remove_target();
    }

    /// Turns toward `cell` and idles.
    pub fn look_at(&mut self, cell: GridCell) {
        if let Some(orientation) = Orientation::between(self.cell, cell) {
            self.orientation = orientation;
        }
        self.idle();
    }

    /// Registers `attacker`. Returns `false` if it was already registered.
    pub fn add_attacker(&mut self, attacker: EntityId) -> bool {
        self.attackers.insert(attacker)
    }

    /// Unregisters `attacker`. The attacker itself is unaffected.
    pub fn remove_attacker(&mut self, attacker: EntityId) -> bool {
        self.attackers.remove(&attacker)
    }

    pub fn has_attacker(&self, attacker: EntityId) -> bool {
        self.attackers.contains(&attacker)
    }

    pub fn is_attacked(&self) -> bool {
        !self.attackers.is_empty()
    }

    pub fn attackers(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.attackers.iter().copied()
    }

    /// Attackers that still exist in the world.
    pub fn live_attackers<'a, L>(&'a self, lookup: &'a L) -> impl Iterator<Item = EntityView> + 'a
    where
        L: EntityLookup + ?Sized,
    {
        self.attackers.iter().filter_map(|&id| lookup.entity(id))
    }

    /// Drops every attacker reference.
    pub fn forget(&mut self) {
        self.attackers.clear();
    }

    /// Drops the target and attackers that no longer exist in the world.
    pub fn prune_stale<L>(&mut self, lookup: &L)
    where
        L: EntityLookup + ?Sized,
    {
        if self.target.is_some_and(|id| !lookup.contains(id)) {
            self.back_off();
        }
        self.attackers.retain(|&id| lookup.contains(id));
    }

    /// Plays the death animation and drops all movement and combat state.
    pub fn die(&mut self) {
        self.flags.insert(MotionFlags::DEAD);
        self.flags.remove(
            MotionFlags::FOLLOWING
                | MotionFlags::ATTACKING
                | MotionFlags::INTERRUPTED
                | MotionFlags::FORCED,
        );
        self.path = None;
        self.pending_destination = None;
        self.target = None;
        self.attackers.clear();
        self.animation = AnimationState::Death;
    }
}

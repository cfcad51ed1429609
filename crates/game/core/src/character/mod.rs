//! Animated characters (players, mobs, NPCs) and their grid movement.
//!
//! A [`Character`] advances one grid cell per movement tick along a path
//! obtained from a [`Pathfinder`](crate::env::Pathfinder). New destinations
//! requested mid-path are batched and applied at the next step boundary, so a
//! burst of clicks costs at most one reroute per step.
//!
//! All movement, target and attacker state is private and only mutated through
//! the character's own methods; collaborators observe it through the hooks in
//! [`CharacterHooks`].

mod combat;
mod health;
mod hooks;
mod movement;

pub use health::{HealthBar, ResourceMeter};
pub use hooks::CharacterHooks;

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::animation::{Action, AnimationState, select_animation};
use crate::config::AnimationSpeeds;
use crate::env::Path;
use crate::state::{EntityId, GridCell, Orientation};

bitflags! {
    /// Boolean movement and combat state of a character.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MotionFlags: u8 {
        const FOLLOWING   = 1 << 0;
        const ATTACKING   = 1 << 1;
        /// Soft stop requested; consumed at the next step boundary.
        const INTERRUPTED = 1 << 2;
        /// New movement requests are ignored while set.
        const FROZEN      = 1 << 3;
        /// The active path was started by a forced move.
        const FORCED      = 1 << 4;
        const DEAD        = 1 << 5;
    }
}

/// Movement state machine plus combat back-references for one entity.
#[derive(Debug)]
pub struct Character {
    id: EntityId,
    cell: GridCell,
    previous_cell: Option<GridCell>,
    next_cell: Option<GridCell>,
    orientation: Orientation,

    path: Option<Path>,
    step: usize,
    destination: Option<GridCell>,
    pending_destination: Option<GridCell>,
    move_direction: Option<Orientation>,

    flags: MotionFlags,
    ranged: bool,
    target: Option<EntityId>,
    attackers: BTreeSet<EntityId>,

    animation: AnimationState,
    speeds: AnimationSpeeds,

    hit_points: ResourceMeter,
    mana: ResourceMeter,
    health_bar: HealthBar,

    hooks: CharacterHooks,
}

impl Character {
    pub fn new(id: EntityId, cell: GridCell) -> Self {
        Self::with_speeds(id, cell, AnimationSpeeds::default())
    }

    pub fn with_speeds(id: EntityId, cell: GridCell, speeds: AnimationSpeeds) -> Self {
        let orientation = Orientation::default();
        Self {
            id,
            cell,
            previous_cell: None,
            next_cell: None,
            orientation,
            path: None,
            step: 0,
            destination: None,
            pending_destination: None,
            move_direction: None,
            flags: MotionFlags::empty(),
            ranged: false,
            target: None,
            attackers: BTreeSet::new(),
            animation: AnimationState::Directional(select_animation(
                Action::Idle,
                orientation,
                &speeds,
            )),
            speeds,
            hit_points: ResourceMeter::default(),
            mana: ResourceMeter::default(),
            health_bar: HealthBar::default(),
            hooks: CharacterHooks::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current grid cell. Updated at the start of a step, not its end.
    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn previous_cell(&self) -> Option<GridCell> {
        self.previous_cell
    }

    /// Lookahead cell: the cell the character is heading into next.
    pub fn next_cell(&self) -> Option<GridCell> {
        self.next_cell
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn destination(&self) -> Option<GridCell> {
        self.destination
    }

    pub fn pending_destination(&self) -> Option<GridCell> {
        self.pending_destination
    }

    pub fn flags(&self) -> MotionFlags {
        self.flags
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn speeds(&self) -> &AnimationSpeeds {
        &self.speeds
    }

    /// True while the character has no path to follow.
    pub fn is_idle(&self) -> bool {
        self.path.is_none()
    }

    pub fn is_following(&self) -> bool {
        self.flags.contains(MotionFlags::FOLLOWING)
    }

    pub fn is_attacking(&self) -> bool {
        self.flags.contains(MotionFlags::ATTACKING)
    }

    pub fn is_interrupted(&self) -> bool {
        self.flags.contains(MotionFlags::INTERRUPTED)
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(MotionFlags::FROZEN)
    }

    pub fn is_dead(&self) -> bool {
        self.flags.contains(MotionFlags::DEAD)
    }

    /// Freezing blocks new movement requests; a path already in progress
    /// keeps running.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.flags.set(MotionFlags::FROZEN, frozen);
    }

    pub fn is_ranged(&self) -> bool {
        self.ranged
    }

    pub fn set_ranged(&mut self, ranged: bool) {
        self.ranged = ranged;
    }

    /// Held keyboard direction, if any.
    pub fn move_direction(&self) -> Option<Orientation> {
        self.move_direction
    }

    pub fn set_move_direction(&mut self, direction: Option<Orientation>) {
        self.move_direction = direction;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Faces `orientation` and plays the matching animation for `action`.
    pub fn perform_action(&mut self, orientation: Orientation, action: Action) {
        self.orientation = orientation;
        self.animate(action);
    }

    pub fn idle(&mut self) {
        self.perform_action(self.orientation, Action::Idle);
    }

    fn animate(&mut self, action: Action) {
        if self.animation.is_death() {
            return;
        }
        self.animation =
            AnimationState::Directional(select_animation(action, self.orientation, &self.speeds));
    }

    /// Notifies the `on_move` hook that the sprite moved on screen.
    pub fn moved(&mut self) {
        self.hooks.fire_moved();
    }
}

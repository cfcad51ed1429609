//! Observer slots through which a character reports progress outward.
//!
//! Each kind has a single slot; registering a new closure replaces the old one.

use std::fmt;

use super::Character;
use crate::env::Path;
use crate::state::GridCell;

/// Registered notification closures for one character.
#[derive(Default)]
pub struct CharacterHooks {
    request_path: Option<Box<dyn FnMut(GridCell, GridCell)>>,
    start_pathing: Option<Box<dyn FnMut(&Path)>>,
    stop_pathing: Option<Box<dyn FnMut(GridCell, bool)>>,
    before_step: Option<Box<dyn FnMut()>>,
    step: Option<Box<dyn FnMut()>>,
    second_step: Option<Box<dyn FnMut()>>,
    moved: Option<Box<dyn FnMut()>>,
    hit_points: Option<Box<dyn FnMut(u32)>>,
}

impl CharacterHooks {
    pub(crate) fn fire_request_path(&mut self, from: GridCell, to: GridCell) {
        if let Some(hook) = self.request_path.as_mut() {
            hook(from, to);
        }
    }

    pub(crate) fn fire_start_pathing(&mut self, path: &Path) {
        if let Some(hook) = self.start_pathing.as_mut() {
            hook(path);
        }
    }

    pub(crate) fn fire_stop_pathing(&mut self, cell: GridCell, forced: bool) {
        if let Some(hook) = self.stop_pathing.as_mut() {
            hook(cell, forced);
        }
    }

    pub(crate) fn fire_before_step(&mut self) {
        if let Some(hook) = self.before_step.as_mut() {
            hook();
        }
    }

    pub(crate) fn fire_step(&mut self) {
        if let Some(hook) = self.step.as_mut() {
            hook();
        }
    }

    pub(crate) fn fire_second_step(&mut self) {
        if let Some(hook) = self.second_step.as_mut() {
            hook();
        }
    }

    pub(crate) fn fire_moved(&mut self) {
        if let Some(hook) = self.moved.as_mut() {
            hook();
        }
    }

    pub(crate) fn fire_hit_points(&mut self, value: u32) {
        if let Some(hook) = self.hit_points.as_mut() {
            hook(value);
        }
    }
}

impl fmt::Debug for CharacterHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterHooks")
            .field("request_path", &self.request_path.is_some())
            .field("start_pathing", &self.start_pathing.is_some())
            .field("stop_pathing", &self.stop_pathing.is_some())
            .field("before_step", &self.before_step.is_some())
            .field("step", &self.step.is_some())
            .field("second_step", &self.second_step.is_some())
            .field("moved", &self.moved.is_some())
            .field("hit_points", &self.hit_points.is_some())
            .finish()
    }
}

impl Character {
    /// Called with `(from, to)` every time a path is requested.
    pub fn on_request_path(&mut self, hook: impl FnMut(GridCell, GridCell) + 'static) {
        self.hooks.request_path = Some(Box::new(hook));
    }

    /// Called when a new path is adopted, before its first step.
    pub fn on_start_pathing(&mut self, hook: impl FnMut(&Path) + 'static) {
        self.hooks.start_pathing = Some(Box::new(hook));
    }

    /// Called with the final cell and whether the path was forced.
    pub fn on_stop_pathing(&mut self, hook: impl FnMut(GridCell, bool) + 'static) {
        self.hooks.stop_pathing = Some(Box::new(hook));
    }

    pub fn on_before_step(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.before_step = Some(Box::new(hook));
    }

    pub fn on_step(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.step = Some(Box::new(hook));
    }

    /// Called on every other step.
    pub fn on_second_step(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.second_step = Some(Box::new(hook));
    }

    pub fn on_move(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.moved = Some(Box::new(hook));
    }

    pub fn on_hit_points(&mut self, hook: impl FnMut(u32) + 'static) {
        self.hooks.hit_points = Some(Box::new(hook));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::state::EntityId;

    use super::*;

    #[test]
    fn last_registration_wins() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut character = Character::new(EntityId(1), GridCell::ORIGIN);

        let counter = Rc::clone(&first);
        character.on_move(move || counter.set(counter.get() + 1));
        let counter = Rc::clone(&second);
        character.on_move(move || counter.set(counter.get() + 1));

        character.moved();
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }
}

//! Grid-stepping movement state machine.
//!
//! One call to [`Character::advance_step`] moves the character exactly one
//! cell along its path. Destinations requested while a path is active are
//! held as a pending destination (last write wins) and applied at the next
//! step boundary.

use super::{Character, MotionFlags};
use crate::animation::Action;
use crate::env::{Path, Pathfinder};
use crate::state::{EntityView, GridCell, Orientation};

impl Character {
    /// Requests movement toward `cell`.
    ///
    /// While idle the path is requested immediately. While already walking the
    /// destination is stored as pending unless `forced`, in which case the
    /// current path is dropped and a fresh one requested. Ignored when frozen.
    pub fn move_to(&mut self, cell: GridCell, forced: bool, pathfinder: &dyn Pathfinder) {
        if self.is_frozen() {
            return;
        }

        self.destination = Some(cell);

        if self.path.is_some() && !forced {
            tracing::trace!(id = %self.id, destination = %cell, "destination queued");
            self.pending_destination = Some(cell);
            return;
        }

        let mut abandoned = false;
        if forced {
            self.flags.insert(MotionFlags::FORCED);
            self.pending_destination = None;
            abandoned = self.path.take().is_some();
        }

        let adopted = match self.request_path(cell, pathfinder) {
            Some(path) => self.follow_path(path, pathfinder),
            None => false,
        };

        if forced && !adopted {
            self.flags.remove(MotionFlags::FORCED);
            if abandoned {
                self.idle();
            }
        }
    }

    /// Player-initiated walk: drops any follow target first.
    pub fn go(&mut self, cell: GridCell, forced: bool, pathfinder: &dyn Pathfinder) {
        if self.is_frozen() {
            return;
        }

        if self.is_following() {
            self.flags.remove(MotionFlags::FOLLOWING);
            self.target = None;
        }

        self.move_to(cell, forced, pathfinder);
    }

    /// Targets `entity` and walks toward its current cell.
    ///
    /// The entity may itself be moving; callers re-invoke this on a cadence.
    /// Repeated calls while walking only replace the pending destination.
    pub fn follow(&mut self, entity: &EntityView, pathfinder: &dyn Pathfinder) {
        self.flags.insert(MotionFlags::FOLLOWING);
        self.set_target(Some(entity.id));
        self.move_to(entity.cell, false, pathfinder);
    }

    /// Adopts `path` and takes its first step.
    ///
    /// Paths shorter than two cells mean the character has already arrived
    /// and are discarded. When following, the final cell is dropped so the
    /// character stops next to its target instead of on top of it.
    /// Returns whether the path was adopted.
    pub fn follow_path(&mut self, mut path: Path, pathfinder: &dyn Pathfinder) -> bool {
        if path.is_trivial() {
            return false;
        }

        if self.is_following() {
            path.pop();
        }

        tracing::debug!(id = %self.id, len = path.len(), "path adopted");

        self.step = 0;
        self.path = Some(path);
        if let Some(path) = &self.path {
            self.hooks.fire_start_pathing(path);
        }

        self.advance_step(pathfinder);
        true
    }

    /// Advances one step along the active path. Invoked once per movement tick.
    pub fn advance_step(&mut self, pathfinder: &dyn Pathfinder) {
        if self.step % 2 == 0 {
            self.hooks.fire_second_step();
        }

        self.previous_cell = Some(self.cell);

        let Some(current) = self.path.as_ref().and_then(|path| path.get(self.step)) else {
            return;
        };

        self.hooks.fire_before_step();
        self.cell = current;

        let mut stop = false;

        if !self.is_interrupted() {
            if let Some(next) = self.path.as_ref().and_then(|path| path.get(self.step + 1)) {
                self.next_cell = Some(next);
            }

            self.hooks.fire_step();

            if let Some(destination) = self.pending_destination.take() {
                tracing::debug!(id = %self.id, %destination, "rerouting");
                self.path = None;
                match self.request_path(destination, pathfinder) {
                    Some(path) if !path.is_trivial() => {
                        self.follow_path(path, pathfinder);
                    }
                    _ => stop = true,
                }
            } else if self.has_next_step() {
                self.step += 1;
                self.update_movement();
            } else {
                stop = true;
            }
        } else {
            stop = true;
            self.flags.remove(MotionFlags::INTERRUPTED);
        }

        if stop {
            self.finish_path();
        }
    }

    /// Stops movement.
    ///
    /// A soft stop takes effect at the next step boundary, letting the
    /// in-flight step complete. While idle a soft stop does nothing, so it
    /// never cancels a later walk.
    ///
    /// A forced stop cancels the path now, snaps the lookahead to the
    /// current cell and switches to the idle animation. The cancelled path's
    /// forced status goes with it.
    pub fn stop(&mut self, force: bool) {
        if !force {
            if self.path.is_some() {
                self.flags.insert(MotionFlags::INTERRUPTED);
            }
            return;
        }

        if self.path.take().is_some() {
            tracing::trace!(id = %self.id, cell = %self.cell, "path cancelled");
        }
        self.pending_destination = None;
        self.flags.remove(MotionFlags::INTERRUPTED | MotionFlags::FORCED);
        self.next_cell = Some(self.cell);
        self.idle();
    }

    /// Server-authoritative position correction.
    pub fn correct_position(&mut self, cell: GridCell) {
        self.stop(true);
        self.cell = cell;
        self.previous_cell = Some(cell);
        self.next_cell = Some(cell);
    }

    pub fn has_next_step(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|path| path.len() > self.step + 1)
    }

    fn request_path(&mut self, to: GridCell, pathfinder: &dyn Pathfinder) -> Option<Path> {
        self.hooks.fire_request_path(self.cell, to);
        pathfinder.find_path(self.cell, to)
    }

    fn update_movement(&mut self) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let (Some(previous), Some(current)) = (
            self.step.checked_sub(1).and_then(|index| path.get(index)),
            path.get(self.step),
        ) else {
            return;
        };

        if let Some(orientation) = Orientation::between(previous, current) {
            self.perform_action(orientation, Action::Walk);
        }
    }

    fn finish_path(&mut self) {
        self.path = None;
        self.pending_destination = None;
        self.idle();

        let forced = self.flags.contains(MotionFlags::FORCED);
        self.hooks.fire_stop_pathing(self.cell, forced);
        self.flags.remove(MotionFlags::FORCED);
    }
}

#[cfg(test)]
mod tests {
    use crate::env::StraightLinePathfinder;
    use crate::state::EntityId;

    use super::*;

    fn walker() -> Character {
        Character::new(EntityId(1), GridCell::ORIGIN)
    }

    #[test]
    fn move_while_idle_takes_first_step() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();

        character.move_to(GridCell::new(3, 0), false, &finder);

        assert!(!character.is_idle());
        assert_eq!(character.cell(), GridCell::ORIGIN);
        assert_eq!(character.step(), 1);
        assert_eq!(character.next_cell(), Some(GridCell::new(1, 0)));
        assert_eq!(character.orientation(), Orientation::Right);
        assert_eq!(character.animation().name(), "walk_right");
    }

    #[test]
    fn walks_to_destination_and_idles() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();

        character.move_to(GridCell::new(0, 2), false, &finder);
        character.advance_step(&finder);
        assert_eq!(character.cell(), GridCell::new(0, 1));
        character.advance_step(&finder);

        assert_eq!(character.cell(), GridCell::new(0, 2));
        assert!(character.is_idle());
        assert!(character.animation().is_idle());
        assert_eq!(character.orientation(), Orientation::Down);
    }

    #[test]
    fn trivial_path_is_discarded() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();

        character.move_to(GridCell::ORIGIN, false, &finder);

        assert!(character.is_idle());
        assert_eq!(character.destination(), Some(GridCell::ORIGIN));
    }

    #[test]
    fn unreachable_destination_leaves_character_idle() {
        let finder = StraightLinePathfinder::with_blocked([GridCell::new(4, 4)]);
        let mut character = walker();

        character.move_to(GridCell::new(4, 4), false, &finder);

        assert!(character.is_idle());
        assert_eq!(character.cell(), GridCell::ORIGIN);
    }

    #[test]
    fn frozen_character_ignores_requests_but_finishes_path() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();
        character.move_to(GridCell::new(2, 0), false, &finder);
        character.set_frozen(true);

        character.move_to(GridCell::new(0, 5), true, &finder);
        assert_eq!(character.pending_destination(), None);
        assert_eq!(character.destination(), Some(GridCell::new(2, 0)));

        character.advance_step(&finder);
        character.advance_step(&finder);
        assert_eq!(character.cell(), GridCell::new(2, 0));
        assert!(character.is_idle());
    }

    #[test]
    fn forced_move_replaces_path_immediately() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();
        character.move_to(GridCell::new(5, 0), false, &finder);
        character.advance_step(&finder);

        character.move_to(GridCell::new(1, 3), true, &finder);

        assert_eq!(character.pending_destination(), None);
        assert!(character.flags().contains(MotionFlags::FORCED));
        assert_eq!(character.path().and_then(Path::last), Some(GridCell::new(1, 3)));
    }

    #[test]
    fn forced_stop_reports_forced_flag_once() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let finder = StraightLinePathfinder::new();
        let stops = Rc::new(RefCell::new(Vec::new()));
        let mut character = walker();
        let sink = Rc::clone(&stops);
        character.on_stop_pathing(move |cell, forced| sink.borrow_mut().push((cell, forced)));

        character.move_to(GridCell::new(1, 0), true, &finder);
        character.advance_step(&finder);
        character.move_to(GridCell::new(2, 0), false, &finder);
        character.advance_step(&finder);

        assert_eq!(
            stops.borrow().as_slice(),
            &[(GridCell::new(1, 0), true), (GridCell::new(2, 0), false)]
        );
    }

    #[test]
    fn soft_stop_while_idle_is_ignored() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();

        character.stop(false);
        assert!(!character.is_interrupted());

        character.move_to(GridCell::new(2, 0), false, &finder);
        assert!(!character.is_idle());
    }

    #[test]
    fn correction_snaps_all_cells() {
        let finder = StraightLinePathfinder::new();
        let mut character = walker();
        character.move_to(GridCell::new(3, 0), false, &finder);

        character.correct_position(GridCell::new(9, 9));

        assert!(character.is_idle());
        assert_eq!(character.cell(), GridCell::new(9, 9));
        assert_eq!(character.previous_cell(), Some(GridCell::new(9, 9)));
        assert_eq!(character.next_cell(), Some(GridCell::new(9, 9)));
    }
}

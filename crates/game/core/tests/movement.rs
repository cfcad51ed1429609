use std::cell::RefCell;
use std::rc::Rc;

use game_core::{
    Character, EntityId, EntityKind, EntityView, GridCell, MotionFlags, Orientation, Path,
    Pathfinder, StraightLinePathfinder,
};

fn walker_at(cell: GridCell) -> Character {
    Character::new(EntityId(1), cell)
}

/// Records every `(from, to)` path request made by a character.
fn record_requests(character: &mut Character) -> Rc<RefCell<Vec<(GridCell, GridCell)>>> {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    character.on_request_path(move |from, to| sink.borrow_mut().push((from, to)));
    requests
}

fn assert_path_invariants(character: &Character) {
    match character.path() {
        Some(path) => {
            assert!(!character.is_idle());
            assert!(character.step() < path.len());
        }
        None => assert!(character.is_idle()),
    }
}

#[test]
fn reclick_storm_costs_one_reroute_per_step() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let requests = record_requests(&mut character);

    character.move_to(GridCell::new(6, 0), false, &finder);
    assert_eq!(requests.borrow().len(), 1);

    character.move_to(GridCell::new(0, 4), false, &finder);
    character.move_to(GridCell::new(3, 3), false, &finder);
    assert_eq!(requests.borrow().len(), 1);
    assert_eq!(character.pending_destination(), Some(GridCell::new(3, 3)));

    character.advance_step(&finder);

    let requests = requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1], (GridCell::new(1, 0), GridCell::new(3, 3)));
    assert_eq!(character.pending_destination(), None);
    assert_eq!(character.path().and_then(Path::last), Some(GridCell::new(3, 3)));
    assert_path_invariants(&character);
}

#[test]
fn idle_iff_no_path_across_a_full_walk() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::new(2, 2));
    assert_path_invariants(&character);

    character.move_to(GridCell::new(-1, 5), false, &finder);
    let mut last_step = character.step();
    for _ in 0..16 {
        assert_path_invariants(&character);
        character.advance_step(&finder);
        if !character.is_idle() {
            assert!(character.step() >= last_step);
            last_step = character.step();
        }
    }

    assert!(character.is_idle());
    assert!(character.animation().is_idle());
    assert_eq!(character.cell(), GridCell::new(-1, 5));
}

#[test]
fn current_cell_updates_at_start_of_step() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let seen = Rc::new(RefCell::new(Vec::new()));

    character.move_to(GridCell::new(0, 3), false, &finder);
    character.advance_step(&finder);

    assert_eq!(character.previous_cell(), Some(GridCell::ORIGIN));
    assert_eq!(character.cell(), GridCell::new(0, 1));
    assert_eq!(character.next_cell(), Some(GridCell::new(0, 2)));

    let sink = Rc::clone(&seen);
    character.on_step(move || sink.borrow_mut().push("step"));
    let sink = Rc::clone(&seen);
    character.on_before_step(move || sink.borrow_mut().push("before"));
    character.advance_step(&finder);

    assert_eq!(seen.borrow().as_slice(), &["before", "step"]);
}

#[test]
fn forced_stop_is_immediate_regardless_of_flags() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    character.move_to(GridCell::new(5, 0), false, &finder);
    character.move_to(GridCell::new(5, 5), false, &finder);
    character.stop(false);

    character.stop(true);

    assert!(character.is_idle());
    assert!(character.animation().is_idle());
    assert_eq!(character.pending_destination(), None);
    assert!(!character.is_interrupted());
    assert_eq!(character.next_cell(), Some(character.cell()));

    character.move_to(GridCell::new(0, 2), false, &finder);
    assert!(!character.is_idle());
}

#[test]
fn walk_after_forced_stop_reports_unforced() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let stops = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stops);
    character.on_stop_pathing(move |cell, forced| sink.borrow_mut().push((cell, forced)));

    character.move_to(GridCell::new(5, 0), true, &finder);
    character.stop(true);
    assert!(!character.flags().contains(MotionFlags::FORCED));

    character.move_to(GridCell::new(1, 2), false, &finder);
    while !character.is_idle() {
        character.advance_step(&finder);
    }

    assert_eq!(stops.borrow().as_slice(), &[(GridCell::new(1, 2), false)]);
}

#[test]
fn soft_stop_completes_in_flight_step() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let stops = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stops);
    character.on_stop_pathing(move |cell, forced| sink.borrow_mut().push((cell, forced)));

    character.move_to(GridCell::new(4, 0), false, &finder);
    character.stop(false);
    assert!(!character.is_idle());

    character.advance_step(&finder);

    assert!(character.is_idle());
    assert!(!character.is_interrupted());
    assert_eq!(character.cell(), GridCell::new(1, 0));
    assert_eq!(stops.borrow().as_slice(), &[(GridCell::new(1, 0), false)]);
}

#[test]
fn double_soft_stop_equals_single() {
    let finder = StraightLinePathfinder::new();
    let mut once = walker_at(GridCell::ORIGIN);
    let mut twice = walker_at(GridCell::ORIGIN);
    once.move_to(GridCell::new(4, 0), false, &finder);
    twice.move_to(GridCell::new(4, 0), false, &finder);

    once.stop(false);
    twice.stop(false);
    twice.stop(false);
    once.advance_step(&finder);
    twice.advance_step(&finder);

    assert_eq!(once.cell(), twice.cell());
    assert_eq!(once.is_idle(), twice.is_idle());
    assert_eq!(once.flags(), twice.flags());
}

#[test]
fn second_step_fires_every_other_step() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    character.on_second_step(move || *sink.borrow_mut() += 1);

    // The first step runs inside move_to with step == 0.
    character.move_to(GridCell::new(4, 0), false, &finder);
    assert_eq!(*count.borrow(), 1);

    // Steps 1..=4.
    for _ in 0..4 {
        character.advance_step(&finder);
    }
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn pending_reroute_to_unreachable_cell_stops() {
    let finder = StraightLinePathfinder::with_blocked([GridCell::new(9, 9)]);
    let mut character = walker_at(GridCell::ORIGIN);

    character.move_to(GridCell::new(3, 0), false, &finder);
    character.move_to(GridCell::new(9, 9), false, &finder);
    character.advance_step(&finder);

    assert!(character.is_idle());
    assert_eq!(character.pending_destination(), None);
    assert_eq!(character.cell(), GridCell::new(1, 0));
}

#[test]
fn follow_reroutes_toward_moving_target() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let mob = EntityView::new(EntityId(5), EntityKind::Mob, GridCell::new(4, 0));

    character.follow(&mob, &finder);
    assert_eq!(character.path().and_then(Path::last), Some(GridCell::new(3, 0)));

    let moved = EntityView {
        cell: GridCell::new(4, 2),
        ..mob
    };
    character.follow(&moved, &finder);
    assert_eq!(character.pending_destination(), Some(GridCell::new(4, 2)));

    while !character.is_idle() {
        character.advance_step(&finder);
    }

    assert_eq!(character.cell(), GridCell::new(4, 1));
    assert_eq!(character.orientation(), Orientation::Down);
    assert_eq!(character.target(), Some(EntityId(5)));
}

#[test]
fn go_drops_follow_target() {
    let finder = StraightLinePathfinder::new();
    let mut character = walker_at(GridCell::ORIGIN);
    let npc = EntityView::new(EntityId(3), EntityKind::Npc, GridCell::new(0, 3));

    character.follow(&npc, &finder);
    character.go(GridCell::new(2, 0), false, &finder);

    assert!(!character.is_following());
    assert_eq!(character.target(), None);
    assert_eq!(character.pending_destination(), Some(GridCell::new(2, 0)));
}

#[test]
fn custom_pathfinder_port_is_consulted() {
    struct Teleporter;

    impl Pathfinder for Teleporter {
        fn find_path(&self, from: GridCell, to: GridCell) -> Option<Path> {
            Some(Path::from_cells(vec![from, to]))
        }
    }

    let mut character = walker_at(GridCell::ORIGIN);
    character.move_to(GridCell::new(8, 8), false, &Teleporter);
    character.advance_step(&Teleporter);

    assert_eq!(character.cell(), GridCell::new(8, 8));
    assert!(character.is_idle());
}

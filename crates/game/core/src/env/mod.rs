//! Ports to collaborators that live outside the movement core.
//!
//! The map layer owns pathfinding and the world layer owns entity storage;
//! the engine only talks to them through these traits.

mod lookup;
mod pathfinding;

pub use lookup::EntityLookup;
pub use pathfinding::{Path, Pathfinder, StraightLinePathfinder};

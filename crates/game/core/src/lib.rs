//! Client-side movement engine for a tile-grid action game.
//!
//! `game-core` drives every animated character through a deterministic
//! grid-stepping state machine: path acquisition, one cell per movement tick,
//! batched mid-path rerouting, soft and forced stops, and orientation-driven
//! animation selection. Pathfinding and entity storage are reached through
//! the ports in [`env`]; collaborators observe progress through per-character
//! hooks.
pub mod animation;
pub mod character;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use animation::{Action, AnimationSelection, AnimationState, select_animation};
pub use character::{Character, CharacterHooks, HealthBar, MotionFlags, ResourceMeter};
pub use config::{AnimationSpeeds, GameConfig};
pub use env::{EntityLookup, Path, Pathfinder, StraightLinePathfinder};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    EntityId, EntityKind, EntityRegistry, EntityView, GridCell, Orientation, WorldError,
};

//! Client-side world state: grid primitives and the live entity registry.

mod common;
mod entities;

pub use common::{EntityId, GridCell, Orientation};
pub use entities::{EntityKind, EntityRegistry, EntityView, WorldError};

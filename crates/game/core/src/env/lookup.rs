use crate::state::{EntityId, EntityView, GridCell};

/// Read-only access to the entities currently present in the client's world.
///
/// Back-references such as a character's target or attackers are plain ids;
/// they are resolved through this port at every use, so an entity that left
/// the world simply resolves to `None`.
pub trait EntityLookup {
    fn entity(&self, id: EntityId) -> Option<EntityView>;

    /// Entity occupying `cell`.
    ///
    /// Other entities take priority over the local player. The local player is
    /// only returned when `include_self` is set and nothing else is there.
    fn entity_at(&self, cell: GridCell, include_self: bool) -> Option<EntityView>;

    fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }
}

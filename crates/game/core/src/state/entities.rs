use std::collections::BTreeMap;

use crate::character::Character;
use crate::env::{EntityLookup, Pathfinder};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GridCell};

/// Broad category of an entity as reported by the server.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    Player,
    Mob,
    Npc,
    Chest,
    Item,
}

impl EntityKind {
    /// Kinds that are animated and move on the grid.
    pub const fn is_character(self) -> bool {
        matches!(self, Self::Player | Self::Mob | Self::Npc)
    }
}

/// Copyable snapshot of an entity, as seen by hit-testing and targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub cell: GridCell,
    /// Player-versus-player flag of the entity itself.
    pub pvp: bool,
}

impl EntityView {
    pub fn new(id: EntityId, kind: EntityKind, cell: GridCell) -> Self {
        Self {
            id,
            kind,
            cell,
            pvp: false,
        }
    }

    pub fn with_pvp(mut self, pvp: bool) -> Self {
        self.pvp = pvp;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("entity {0} not found")]
    UnknownEntity(EntityId),

    #[error("entity {0} is not a character")]
    NotACharacter(EntityId),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) => ErrorSeverity::Recoverable,
            Self::DuplicateEntity(_) | Self::NotACharacter(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity(_) => "WORLD_DUPLICATE_ENTITY",
            Self::UnknownEntity(_) => "WORLD_UNKNOWN_ENTITY",
            Self::NotACharacter(_) => "WORLD_NOT_A_CHARACTER",
        }
    }
}

#[derive(Debug)]
enum Body {
    Character(Box<Character>),
    Static(GridCell),
}

#[derive(Debug)]
struct Entity {
    kind: EntityKind,
    pvp: bool,
    body: Body,
}

impl Entity {
    fn cell(&self) -> GridCell {
        match &self.body {
            Body::Character(character) => character.cell(),
            Body::Static(cell) => *cell,
        }
    }

    fn view(&self, id: EntityId) -> EntityView {
        EntityView {
            id,
            kind: self.kind,
            cell: self.cell(),
            pvp: self.pvp,
        }
    }
}

/// Live set of entities visible to the client, keyed by id.
///
/// Characters are owned here; everything else refers to them by id.
#[derive(Debug)]
pub struct EntityRegistry {
    local_player: EntityId,
    entities: BTreeMap<EntityId, Entity>,
}

impl EntityRegistry {
    pub fn new(local_player: EntityId) -> Self {
        Self {
            local_player,
            entities: BTreeMap::new(),
        }
    }

    pub fn local_player(&self) -> EntityId {
        self.local_player
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn spawn_character(
        &mut self,
        kind: EntityKind,
        pvp: bool,
        character: Character,
    ) -> Result<EntityId, WorldError> {
        let id = character.id();
        if !kind.is_character() {
            return Err(WorldError::NotACharacter(id));
        }
        self.insert(
            id,
            Entity {
                kind,
                pvp,
                body: Body::Character(Box::new(character)),
            },
        )
    }

    pub fn spawn_static(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        cell: GridCell,
    ) -> Result<EntityId, WorldError> {
        self.insert(
            id,
            Entity {
                kind,
                pvp: false,
                body: Body::Static(cell),
            },
        )
    }

    fn insert(&mut self, id: EntityId, entity: Entity) -> Result<EntityId, WorldError> {
        if self.entities.contains_key(&id) {
            return Err(WorldError::DuplicateEntity(id));
        }
        tracing::debug!(%id, kind = %entity.kind, "entity spawned");
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Removes an entity. References held by others become stale and resolve
    /// to `None` from then on.
    pub fn despawn(&mut self, id: EntityId) -> Result<EntityView, WorldError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(WorldError::UnknownEntity(id))?;
        tracing::debug!(%id, "entity despawned");
        Ok(entity.view(id))
    }

    pub fn get(&self, id: EntityId) -> Option<EntityView> {
        self.entities.get(&id).map(|entity| entity.view(id))
    }

    pub fn set_pvp(&mut self, id: EntityId, pvp: bool) -> Result<(), WorldError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?;
        entity.pvp = pvp;
        Ok(())
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        match &self.entities.get(&id)?.body {
            Body::Character(character) => Some(character.as_ref()),
            Body::Static(_) => None,
        }
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        match &mut self.entities.get_mut(&id)?.body {
            Body::Character(character) => Some(character.as_mut()),
            Body::Static(_) => None,
        }
    }

    /// Like [`character_mut`](Self::character_mut) but reports why it failed.
    pub fn try_character_mut(&mut self, id: EntityId) -> Result<&mut Character, WorldError> {
        match &mut self
            .entities
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?
            .body
        {
            Body::Character(character) => Ok(character.as_mut()),
            Body::Static(_) => Err(WorldError::NotACharacter(id)),
        }
    }

    pub fn player(&self) -> Option<&Character> {
        self.character(self.local_player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Character> {
        self.character_mut(self.local_player)
    }

    pub fn views(&self) -> impl Iterator<Item = EntityView> + '_ {
        self.entities.iter().map(|(&id, entity)| entity.view(id))
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.entities.values().filter_map(|entity| match &entity.body {
            Body::Character(character) => Some(character.as_ref()),
            Body::Static(_) => None,
        })
    }

    fn characters_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.entities
            .values_mut()
            .filter_map(|entity| match &mut entity.body {
                Body::Character(character) => Some(character.as_mut()),
                Body::Static(_) => None,
            })
    }

    /// Movement tick: advances every walking character by one step.
    pub fn tick(&mut self, pathfinder: &dyn Pathfinder) {
        for character in self.characters_mut() {
            if !character.is_idle() {
                character.advance_step(pathfinder);
            }
        }
    }

    /// Re-drives every follower toward its target's current cell.
    ///
    /// Followers whose target has left the world back off.
    pub fn refresh_followers(&mut self, pathfinder: &dyn Pathfinder) {
        let followers: Vec<(EntityId, Option<EntityView>)> = self
            .characters()
            .filter(|character| character.is_following())
            .map(|character| (character.id(), character.live_target(self)))
            .collect();

        for (id, target) in followers {
            let Some(character) = self.character_mut(id) else {
                continue;
            };
            match target {
                Some(target) => character.follow(&target, pathfinder),
                None => character.back_off(),
            }
        }
    }
}

impl EntityLookup for EntityRegistry {
    fn entity(&self, id: EntityId) -> Option<EntityView> {
        self.get(id)
    }

    fn entity_at(&self, cell: GridCell, include_self: bool) -> Option<EntityView> {
        let mut local = None;
        for (&id, entity) in &self.entities {
            if entity.cell() != cell {
                continue;
            }
            if id == self.local_player {
                local = Some(entity.view(id));
                continue;
            }
            return Some(entity.view(id));
        }
        local.filter(|_| include_self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StraightLinePathfinder;

    const PLAYER: EntityId = EntityId(1);

    fn registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new(PLAYER);
        registry
            .spawn_character(EntityKind::Player, false, Character::new(PLAYER, GridCell::ORIGIN))
            .unwrap();
        registry
    }

    #[test]
    fn duplicate_spawn_is_rejected() {
        let mut registry = registry();
        let err = registry
            .spawn_static(PLAYER, EntityKind::Chest, GridCell::new(1, 1))
            .unwrap_err();
        assert_eq!(err, WorldError::DuplicateEntity(PLAYER));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn entity_at_prefers_others_over_self() {
        let mut registry = registry();
        assert_eq!(registry.entity_at(GridCell::ORIGIN, false), None);
        assert_eq!(
            registry.entity_at(GridCell::ORIGIN, true).map(|view| view.id),
            Some(PLAYER)
        );

        registry
            .spawn_character(EntityKind::Mob, false, Character::new(EntityId(9), GridCell::ORIGIN))
            .unwrap();
        assert_eq!(
            registry.entity_at(GridCell::ORIGIN, true).map(|view| view.id),
            Some(EntityId(9))
        );
    }

    #[test]
    fn only_character_kinds_spawn_as_characters() {
        let mut registry = registry();
        let err = registry
            .spawn_character(EntityKind::Chest, false, Character::new(EntityId(6), GridCell::ORIGIN))
            .unwrap_err();
        assert_eq!(err, WorldError::NotACharacter(EntityId(6)));
        assert!(registry.get(EntityId(6)).is_none());
    }

    #[test]
    fn static_entities_are_not_characters() {
        let mut registry = registry();
        registry
            .spawn_static(EntityId(4), EntityKind::Chest, GridCell::new(2, 2))
            .unwrap();
        assert!(registry.character(EntityId(4)).is_none());
        assert_eq!(
            registry.try_character_mut(EntityId(4)).unwrap_err(),
            WorldError::NotACharacter(EntityId(4))
        );
        assert_eq!(
            registry.try_character_mut(EntityId(5)).unwrap_err(),
            WorldError::UnknownEntity(EntityId(5))
        );
    }

    #[test]
    fn tick_advances_only_walkers() {
        let finder = StraightLinePathfinder::new();
        let mut registry = registry();
        registry
            .spawn_character(EntityKind::Mob, false, Character::new(EntityId(2), GridCell::new(5, 5)))
            .unwrap();
        registry
            .player_mut()
            .unwrap()
            .move_to(GridCell::new(2, 0), false, &finder);

        registry.tick(&finder);

        assert_eq!(registry.get(PLAYER).unwrap().cell, GridCell::new(1, 0));
        assert_eq!(registry.get(EntityId(2)).unwrap().cell, GridCell::new(5, 5));
    }

    #[test]
    fn followers_of_despawned_targets_back_off() {
        let finder = StraightLinePathfinder::new();
        let mut registry = registry();
        registry
            .spawn_character(EntityKind::Mob, false, Character::new(EntityId(2), GridCell::new(4, 0)))
            .unwrap();
        let target = registry.get(EntityId(2)).unwrap();
        registry.player_mut().unwrap().follow(&target, &finder);

        registry.despawn(EntityId(2)).unwrap();
        registry.refresh_followers(&finder);

        let player = registry.player().unwrap();
        assert!(!player.is_following());
        assert!(!player.has_target());
    }
}

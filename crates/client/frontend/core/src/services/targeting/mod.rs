//! Entity classification for click targeting and hover feedback.
//!
//! Decides whether an entity under the pointer can be attacked, should be
//! followed, or is merely interactable, given the local game mode.

use game_core::{EntityId, EntityKind, EntityView, GameConfig, GridCell};

/// How the local player relates to an entity under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TargetClass {
    /// Reachable but not attackable (NPCs, non-PvP players).
    Passive,
    Hostile,
    /// Loot containers and dropped items.
    Interactable,
    /// The local player itself.
    Own,
}

/// Whether the local player may attack `entity`.
///
/// Mobs always; other players only when both the local game mode and the
/// target have PvP enabled.
pub fn is_attackable(entity: &EntityView, local_pvp: bool) -> bool {
    match entity.kind {
        EntityKind::Mob => true,
        EntityKind::Player => local_pvp && entity.pvp,
        EntityKind::Npc | EntityKind::Chest | EntityKind::Item => false,
    }
}

/// Whether clicking `entity` should make it the player's target.
pub fn is_targetable(entity: &EntityView, local_pvp: bool) -> bool {
    is_attackable(entity, local_pvp) || matches!(entity.kind, EntityKind::Npc | EntityKind::Chest)
}

pub fn classify(entity: &EntityView, local_player: EntityId, local_pvp: bool) -> TargetClass {
    if entity.id == local_player {
        return TargetClass::Own;
    }
    if is_attackable(entity, local_pvp) {
        return TargetClass::Hostile;
    }
    match entity.kind {
        EntityKind::Chest | EntityKind::Item => TargetClass::Interactable,
        EntityKind::Player | EntityKind::Mob | EntityKind::Npc => TargetClass::Passive,
    }
}

/// Ranged characters attack from where they stand inside this reach.
pub fn is_in_ranged_reach(player: GridCell, entity: GridCell) -> bool {
    player.distance(entity) < GameConfig::RANGED_ATTACK_DISTANCE
}

/// On-screen marker drawn under the clicked cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetIndicator {
    #[default]
    Passive,
    Hostile,
}

impl TargetIndicator {
    /// Row of the target sprite sheet.
    pub const fn sprite_row(self) -> u32 {
        match self {
            Self::Passive => 0,
            Self::Hostile => 1,
        }
    }

    pub const fn colour(self) -> &'static str {
        match self {
            Self::Passive => "rgb(51, 255, 0)",
            Self::Hostile => "rgb(255, 51, 0)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: EntityId = EntityId(1);

    fn view(id: u32, kind: EntityKind) -> EntityView {
        EntityView::new(EntityId(id), kind, GridCell::ORIGIN)
    }

    #[test]
    fn mobs_are_always_attackable() {
        assert!(is_attackable(&view(2, EntityKind::Mob), false));
        assert!(is_targetable(&view(2, EntityKind::Mob), false));
    }

    #[test]
    fn players_need_pvp_on_both_sides() {
        let rival = view(2, EntityKind::Player);
        assert!(!is_attackable(&rival, true));
        assert!(!is_attackable(&rival.with_pvp(true), false));
        assert!(is_attackable(&rival.with_pvp(true), true));
        assert!(!is_targetable(&rival, true));
    }

    #[test]
    fn chests_are_targetable_but_never_attackable() {
        let chest = view(3, EntityKind::Chest);
        assert!(is_targetable(&chest, true));
        assert!(!is_attackable(&chest, true));
        assert_eq!(classify(&chest, PLAYER, true), TargetClass::Interactable);
    }

    #[test]
    fn items_are_neither() {
        let item = view(4, EntityKind::Item);
        assert!(!is_targetable(&item, true));
        assert_eq!(classify(&item, PLAYER, false), TargetClass::Interactable);
    }

    #[test]
    fn classification() {
        assert_eq!(classify(&view(1, EntityKind::Player), PLAYER, true), TargetClass::Own);
        assert_eq!(classify(&view(5, EntityKind::Npc), PLAYER, true), TargetClass::Passive);
        assert_eq!(classify(&view(6, EntityKind::Mob), PLAYER, false), TargetClass::Hostile);
    }

    #[test]
    fn ranged_reach_is_strictly_below_seven_tiles() {
        assert!(is_in_ranged_reach(GridCell::ORIGIN, GridCell::new(6, 6)));
        assert!(is_in_ranged_reach(GridCell::ORIGIN, GridCell::new(-6, 2)));
        assert!(!is_in_ranged_reach(GridCell::ORIGIN, GridCell::new(7, 0)));
    }

    #[test]
    fn indicator_rows_and_colours() {
        assert_eq!(TargetIndicator::default(), TargetIndicator::Passive);
        assert_eq!(TargetIndicator::Passive.sprite_row(), 0);
        assert_eq!(TargetIndicator::Hostile.sprite_row(), 1);
        assert_eq!(TargetIndicator::Hostile.colour(), "rgb(255, 51, 0)");
    }
}

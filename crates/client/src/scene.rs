//! Demo scene played by the binary.

use client_frontend_core::{InputEvent, ScreenLayout, SpriteId};
use crossterm::event::KeyCode;
use game_core::{Character, EntityId, EntityKind, EntityRegistry, GameConfig, GridCell, WorldError};

use crate::script::{Cue, Script, pointer_at};

pub const PLAYER: EntityId = EntityId(1);
pub const RAT: EntityId = EntityId(10);
pub const ARCHER: EntityId = EntityId(11);
pub const GUARD: EntityId = EntityId(12);
pub const CHEST: EntityId = EntityId(20);

/// A player, two mobs, an NPC and a chest on an open field.
pub fn demo_world(config: &GameConfig) -> Result<EntityRegistry, WorldError> {
    let mut world = EntityRegistry::new(PLAYER);
    let spawn = |id, x, y| Character::with_speeds(id, GridCell::new(x, y), config.animation);

    let mut player = spawn(PLAYER, 2, 2);
    player.set_max_hit_points(100);
    player.set_hit_points(100);
    player.on_start_pathing(|path| {
        tracing::debug!(len = path.len(), destination = ?path.last(), "player path started");
    });
    player.on_stop_pathing(|cell, forced| {
        tracing::debug!(%cell, forced, "player stopped");
    });
    player.on_step(|| tracing::trace!("player step"));
    world.spawn_character(EntityKind::Player, false, player)?;

    let mut rat = spawn(RAT, 8, 2);
    rat.set_max_hit_points(20);
    rat.set_hit_points(20);
    world.spawn_character(EntityKind::Mob, false, rat)?;

    world.spawn_character(EntityKind::Mob, false, spawn(ARCHER, 4, 9))?;
    world.spawn_character(EntityKind::Npc, false, spawn(GUARD, 12, 5))?;
    world.spawn_static(CHEST, EntityKind::Chest, GridCell::new(6, 6))?;

    Ok(world)
}

/// Every cursor glyph maps onto a sprite sheet slot.
pub fn demo_sprite(name: &str) -> Option<SpriteId> {
    const SHEET: [&str; 8] = ["hand", "sword", "bow", "loot", "talk", "target", "arrow", "spell"];
    SHEET
        .iter()
        .position(|slot| *slot == name)
        .map(|index| SpriteId(index as u32))
}

/// Follow the rat while it flees, walk with the keyboard, chat, then loot.
pub fn demo_script(layout: &ScreenLayout) -> Script {
    Script::new()
        .at(2, Cue::Pointer(pointer_at(layout, GridCell::new(8, 2))))
        .at(4, Cue::Input(InputEvent::Click(pointer_at(layout, GridCell::new(8, 2)))))
        .at(20, Cue::Walk(RAT, GridCell::new(10, 4)))
        .at(200, Cue::Input(InputEvent::Key(KeyCode::Char('s'))))
        .at(260, Cue::KeyUp(KeyCode::Char('s')))
        .at(270, Cue::Input(InputEvent::Key(KeyCode::Enter)))
        .at(272, Cue::Input(InputEvent::Key(KeyCode::Char('h'))))
        .at(274, Cue::Input(InputEvent::Key(KeyCode::Enter)))
        .at(280, Cue::Input(InputEvent::Key(KeyCode::Char('1'))))
        .at(290, Cue::Pointer(pointer_at(layout, GridCell::new(6, 6))))
        .at(292, Cue::Input(InputEvent::Click(pointer_at(layout, GridCell::new(6, 6)))))
}

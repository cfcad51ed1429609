//! Pointer cursor glyphs and hover feedback.
//!
//! The glyph shown under the pointer is recomputed every frame from the entity
//! beneath it, but only committed to the screen by [`CursorFeedback::commit`]
//! while the cursor is visible.

mod registry;

pub use registry::{CursorError, CursorRegistry, SpriteId, SpriteSource};

use game_core::{EntityId, EntityKind, EntityView};

/// Cursor sprites, keyed by their lowercase asset name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CursorGlyph {
    Hand,
    Sword,
    Bow,
    Loot,
    Talk,
    Target,
    Arrow,
    Spell,
}

impl CursorGlyph {
    /// Glyph shown over something the player can attack.
    pub const fn attack(ranged: bool) -> Self {
        if ranged { Self::Bow } else { Self::Sword }
    }
}

/// Category of entity under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Hovering {
    Item,
    Mob,
    Player,
    Npc,
}

/// Glyph and hover category for whatever lies under the pointer.
pub fn hover_cursor(
    entity: Option<&EntityView>,
    local_player: EntityId,
    local_pvp: bool,
    ranged: bool,
) -> (CursorGlyph, Option<Hovering>) {
    let Some(entity) = entity.filter(|entity| entity.id != local_player) else {
        return (CursorGlyph::Hand, None);
    };

    match entity.kind {
        EntityKind::Item | EntityKind::Chest => (CursorGlyph::Loot, Some(Hovering::Item)),
        EntityKind::Mob => (CursorGlyph::attack(ranged), Some(Hovering::Mob)),
        EntityKind::Player => {
            let glyph = if local_pvp && entity.pvp {
                CursorGlyph::attack(ranged)
            } else {
                CursorGlyph::Hand
            };
            (glyph, Some(Hovering::Player))
        }
        EntityKind::Npc => (CursorGlyph::Talk, Some(Hovering::Npc)),
    }
}

/// Per-frame cursor state: what is requested and what is on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorFeedback {
    visible: bool,
    cursor: Option<CursorGlyph>,
    requested: Option<CursorGlyph>,
    target_colour: Option<&'static str>,
    requested_target_colour: Option<&'static str>,
    hovering: Option<Hovering>,
}

impl Default for CursorFeedback {
    fn default() -> Self {
        Self {
            visible: true,
            cursor: None,
            requested: None,
            target_colour: None,
            requested_target_colour: None,
            hovering: None,
        }
    }
}

impl CursorFeedback {
    pub const HOVER_TARGET_COLOUR: &'static str = "rgba(255, 255, 255, 0.5)";

    /// Requests the default hand cursor once sprites are available.
    pub fn reset(&mut self, registry: &CursorRegistry) -> Result<(), CursorError> {
        self.requested_target_colour = Some(Self::HOVER_TARGET_COLOUR);
        self.set_cursor(CursorGlyph::Hand, registry)
    }

    /// Requests `glyph` for the next commit.
    ///
    /// When the sprite is unavailable the previous request stays in place.
    pub fn set_cursor(
        &mut self,
        glyph: CursorGlyph,
        registry: &CursorRegistry,
    ) -> Result<(), CursorError> {
        registry.get(glyph)?;
        self.requested = Some(glyph);
        Ok(())
    }

    pub fn set_hovering(&mut self, hovering: Option<Hovering>) {
        self.hovering = hovering;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Applies the requested cursor and colour. Skipped while hidden.
    pub fn commit(&mut self) {
        if !self.visible {
            return;
        }
        self.cursor = self.requested;
        self.target_colour = self.requested_target_colour;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Cursor currently on screen.
    pub fn cursor(&self) -> Option<CursorGlyph> {
        self.cursor
    }

    pub fn requested(&self) -> Option<CursorGlyph> {
        self.requested
    }

    pub fn target_colour(&self) -> Option<&'static str> {
        self.target_colour
    }

    pub fn hovering(&self) -> Option<Hovering> {
        self.hovering
    }
}

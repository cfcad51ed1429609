use std::collections::BTreeMap;

use game_core::{ErrorSeverity, GameError};
use strum::IntoEnumIterator;

use super::CursorGlyph;

/// Handle to a sprite owned by the renderer's asset store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

/// Asset store the cursor glyphs are resolved against.
pub trait SpriteSource {
    fn sprite(&self, name: &str) -> Option<SpriteId>;
}

impl<F> SpriteSource for F
where
    F: Fn(&str) -> Option<SpriteId>,
{
    fn sprite(&self, name: &str) -> Option<SpriteId> {
        self(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("cursor glyph `{0}` has no sprite")]
    MissingGlyph(CursorGlyph),

    #[error("unknown cursor glyph `{0}`")]
    UnknownGlyph(String),

    #[error("cursor sprites are not loaded yet")]
    NotLoaded,
}

impl GameError for CursorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingGlyph(_) | Self::NotLoaded => ErrorSeverity::Recoverable,
            Self::UnknownGlyph(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingGlyph(_) => "CURSOR_MISSING_GLYPH",
            Self::UnknownGlyph(_) => "CURSOR_UNKNOWN_GLYPH",
            Self::NotLoaded => "CURSOR_NOT_LOADED",
        }
    }
}

/// Cursor sprites resolved once from the asset store.
///
/// Starts empty; [`CursorRegistry::load`] is called after the sprite sheet
/// becomes available.
#[derive(Clone, Debug, Default)]
pub struct CursorRegistry {
    sprites: BTreeMap<CursorGlyph, SpriteId>,
    loaded: bool,
}

impl CursorRegistry {
    pub fn load(source: &dyn SpriteSource) -> Self {
        let mut sprites = BTreeMap::new();
        for glyph in CursorGlyph::iter() {
            match source.sprite(glyph.as_ref()) {
                Some(sprite) => {
                    sprites.insert(glyph, sprite);
                }
                None => {
                    tracing::error!(error = %CursorError::MissingGlyph(glyph), "cursor unavailable");
                }
            }
        }

        tracing::info!(count = sprites.len(), "loaded cursors");
        Self {
            sprites,
            loaded: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, glyph: CursorGlyph) -> Result<SpriteId, CursorError> {
        if !self.loaded {
            return Err(CursorError::NotLoaded);
        }
        self.sprites
            .get(&glyph)
            .copied()
            .ok_or(CursorError::MissingGlyph(glyph))
    }

    /// Looks a glyph up by its asset name, e.g. `"sword"`.
    pub fn by_name(&self, name: &str) -> Result<SpriteId, CursorError> {
        let glyph = name
            .parse::<CursorGlyph>()
            .map_err(|_| CursorError::UnknownGlyph(name.to_owned()))?;
        self.get(glyph)
    }
}

//! Client builder.

use anyhow::{Context, Result};
use client_frontend_core::{Camera, CursorRegistry, FrontendConfig, InputResolver, SpriteSource};
use game_core::{EntityRegistry, GameConfig, Pathfinder, StraightLinePathfinder};

use crate::{Client, frames_per_step};

/// Builder for constructing a [`Client`].
///
/// The world is required; the pathfinder defaults to an open field and the
/// cursor registry stays unloaded until sprites are supplied.
#[derive(Default)]
pub struct ClientBuilder {
    world: Option<EntityRegistry>,
    config: Option<FrontendConfig>,
    game: Option<GameConfig>,
    pathfinder: Option<Box<dyn Pathfinder>>,
    cursors: Option<CursorRegistry>,
    camera: Option<Camera>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(mut self, world: EntityRegistry) -> Self {
        self.world = Some(world);
        self
    }

    pub fn config(mut self, config: FrontendConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Gameplay tuning; the movement period sets how many frames one step
    /// spans.
    pub fn game_config(mut self, game: GameConfig) -> Self {
        self.game = Some(game);
        self
    }

    pub fn pathfinder(mut self, pathfinder: impl Pathfinder + 'static) -> Self {
        self.pathfinder = Some(Box::new(pathfinder));
        self
    }

    /// Resolves cursor glyphs against `sprites`.
    pub fn sprites(mut self, sprites: &dyn SpriteSource) -> Self {
        self.cursors = Some(CursorRegistry::load(sprites));
        self
    }

    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn build(self) -> Result<Client> {
        let world = self
            .world
            .context("World is required. Use .world() to set it.")?;
        let config = self.config.unwrap_or_default();
        let game = self.game.unwrap_or_default();
        let cursors = self.cursors.unwrap_or_default();
        let pathfinder = self
            .pathfinder
            .unwrap_or_else(|| Box::new(StraightLinePathfinder::new()));

        world
            .player()
            .with_context(|| format!("local player {} is not spawned", world.local_player()))?;

        let mut resolver = InputResolver::new(&config);
        resolver.set_camera(self.camera);
        if cursors.is_loaded() {
            resolver.reset_cursor(&cursors);
        }

        Ok(Client {
            world,
            resolver,
            cursors,
            pathfinder,
            frames_per_step: frames_per_step(game.movement_speed_ms, config.frame_ms),
            config,
            frame: 0,
        })
    }
}

//! Top-level client driving movement and input from a fixed-rate frame loop.
//!
//! ```text
//! Client
//!   ├─→ EntityRegistry (characters, movement state machines)
//!   ├─→ InputResolver  (keys and clicks → intents and effects)
//!   ├─→ CursorRegistry (cursor sprites)
//!   └─→ Pathfinder     (route search)
//! ```
//!
//! Each frame the client feeds queued input to the resolver, applies the
//! resulting effects, refreshes hover feedback and, once per movement
//! period, advances every walking character one cell.

mod builder;
pub mod scene;
pub mod script;

pub use builder::ClientBuilder;

use std::time::Duration;

use anyhow::Result;
use client_frontend_core::{ClientEffect, CursorRegistry, FrontendConfig, InputEvent, InputResolver};
use game_core::{EntityId, EntityRegistry, Pathfinder};

use script::{Cue, Script};

/// Assembled client.
pub struct Client {
    world: EntityRegistry,
    resolver: InputResolver,
    cursors: CursorRegistry,
    pathfinder: Box<dyn Pathfinder>,
    config: FrontendConfig,
    frames_per_step: u64,
    frame: u64,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn world(&self) -> &EntityRegistry {
        &self.world
    }

    pub fn resolver(&self) -> &InputResolver {
        &self.resolver
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn now_ms(&self) -> u64 {
        self.frame * self.config.frame_ms
    }

    /// Runs frames on a fixed interval until the script is exhausted and
    /// every character has stopped, or until Ctrl-C.
    pub async fn run(&mut self, mut script: Script) -> Result<()> {
        let mut interval = tokio::time::interval(Duration::from_millis(self.config.frame_ms));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                result = tokio::signal::ctrl_c() => {
                    result?;
                    tracing::info!(frame = self.frame, "interrupted");
                    return Ok(());
                }
            }

            let cues = script.take(self.frame);
            self.step_frame(cues);

            if script.is_empty() && self.is_settled() {
                tracing::info!(frame = self.frame, "session settled");
                return Ok(());
            }
        }
    }

    /// Advances one frame.
    pub fn step_frame(&mut self, cues: Vec<Cue>) {
        let now_ms = self.now_ms();

        for cue in cues {
            self.apply_cue(cue, now_ms);
        }

        if let Some(resolution) = self
            .resolver
            .drive_direction(&mut self.world, self.pathfinder.as_ref())
        {
            self.apply_effects(resolution.effects, now_ms);
        }

        if let Some(effect) = self.resolver.update_hover(&self.world, &self.cursors) {
            self.apply_effects(vec![effect], now_ms);
        }
        self.resolver.commit_cursor();

        if self.frame % self.frames_per_step == 0 {
            self.world.refresh_followers(self.pathfinder.as_ref());
            self.world.tick(self.pathfinder.as_ref());
        }

        self.update_health_bars(now_ms);
        self.frame += 1;
    }

    fn apply_cue(&mut self, cue: Cue, now_ms: u64) {
        tracing::debug!(frame = self.frame, ?cue, "cue");
        match cue {
            Cue::Input(event) => {
                let effects = self
                    .resolver
                    .handle(event, &mut self.world, self.pathfinder.as_ref());
                self.apply_effects(effects, now_ms);
            }
            Cue::KeyUp(code) => self.resolver.key_up(code, &mut self.world),
            Cue::Pointer(pointer) => self.resolver.pointer_moved(pointer),
            Cue::Walk(id, cell) => match self.world.try_character_mut(id) {
                Ok(character) => character.move_to(cell, false, self.pathfinder.as_ref()),
                Err(error) => tracing::warn!(%error, "scripted walk skipped"),
            },
        }
    }

    fn apply_effects(&mut self, effects: Vec<ClientEffect>, now_ms: u64) {
        for effect in effects {
            match effect {
                ClientEffect::SendAttack(intent) => {
                    tracing::info!(opcode = %intent.opcode, entity = %intent.entity, "target packet");
                    if let Some(target) = self.world.character_mut(intent.entity) {
                        target.trigger_health_bar(now_ms);
                    }
                }
                ClientEffect::ChatKey(code) => {
                    tracing::debug!(?code, "chat key");
                    if code == crossterm::event::KeyCode::Enter {
                        self.resolver.chat_mut().active = false;
                    }
                }
                ClientEffect::OverlayHover(entity) => {
                    tracing::trace!(?entity, "overlay");
                }
                other => tracing::debug!(effect = ?other, "ui effect"),
            }
        }
    }

    fn update_health_bars(&mut self, now_ms: u64) {
        let ids: Vec<EntityId> = self
            .world
            .characters()
            .map(|character| character.id())
            .collect();
        for id in ids {
            if let Some(character) = self.world.character_mut(id) {
                character.update_health_bar(now_ms);
            }
        }
    }

    fn is_settled(&self) -> bool {
        self.world.characters().all(|character| character.is_idle())
    }

    /// Feeds a single input event outside the frame loop.
    pub fn dispatch(&mut self, event: InputEvent) {
        let now_ms = self.now_ms();
        let effects = self
            .resolver
            .handle(event, &mut self.world, self.pathfinder.as_ref());
        self.apply_effects(effects, now_ms);
    }
}

fn frames_per_step(movement_speed_ms: u32, frame_ms: u64) -> u64 {
    u64::from(movement_speed_ms).div_ceil(frame_ms.max(1)).max(1)
}
